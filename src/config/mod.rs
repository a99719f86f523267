//! Configuration models for the vehicle pool, service duration and queue backend.

pub mod dispatch;

pub use dispatch::{DispatchConfig, QueueBackendConfig};
