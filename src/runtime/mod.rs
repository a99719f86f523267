//! Runtime adapters (tokio spawner, completion timers) and API surface.

pub mod api;
pub mod timer;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{ComplaintSubmission, DispatchResponse, ErrorResponse, MessageResponse};
#[cfg(feature = "tokio-runtime")]
pub use timer::SpawnTimer;
pub use timer::ManualTimer;
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
