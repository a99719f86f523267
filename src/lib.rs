//! # Prometheus Dispatch
//!
//! A priority admission and resource-scheduling engine for complaint dispatch.
//!
//! Incoming work items (complaints) compete for a small, fixed pool of
//! interchangeable resources (vehicles). The dispatcher keeps pending work in a
//! priority intake queue, assigns free vehicles highest-priority first, parks
//! work in a FIFO waiting list when the pool is exhausted, and resolves each
//! assignment after a fixed service duration. A vehicle freed by a resolution
//! goes straight to the oldest waiting item.
//!
//! ## Lifecycle
//!
//! ```text
//! submit -> intake queue -> dispatch_cycle -> in progress -> (service duration) -> resolved
//!                         \-> waiting list (pool exhausted) -/
//! ```
//!
//! ## Key Features
//!
//! - **Priority intake**: descending priority, first-submitted first among ties
//! - **Non-blocking pool**: acquisition is a poll; exhausted pools park work instead of blocking
//! - **Waiting list fairness**: freed vehicles serve waiting work before fresh intake
//! - **Serialized state**: one lock per operation, safe under a multi-threaded runtime
//! - **Event sinks**: assignment and resolution events for logging or persistence layers
//!
//! ## Example
//!
//! ```rust,ignore
//! use prometheus_dispatch::builders::DispatcherBuilder;
//! use prometheus_dispatch::config::DispatchConfig;
//! use prometheus_dispatch::core::NewWorkItem;
//!
//! let dispatcher = DispatcherBuilder::new(DispatchConfig::default())
//!     .with_tracing()
//!     .build()?;
//!
//! dispatcher.submit(NewWorkItem::new("c-1", "Overflowing bin", 5, "Elm St"))?;
//! dispatcher.submit(NewWorkItem::new("c-2", "Gas leak", 9, "Oak Ave"))?;
//! let assigned = dispatcher.dispatch_cycle();
//! ```
//!
//! For complete scenarios, see `tests/dispatch_algorithm_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core dispatch abstractions and scheduling state.
pub mod core;
/// Configuration models for the vehicle pool and service duration.
pub mod config;
/// Builders to construct dispatchers from configuration.
pub mod builders;
/// Infrastructure adapters for intake queue backends.
pub mod infra;
/// Runtime adapters (tokio, manual timers) and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
