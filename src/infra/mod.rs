//! Infrastructure adapters: intake queue backends.

pub mod queue;
pub use queue::{LinearIntakeQueue, OrderedIntakeQueue};
