//! Intake queue backends.

pub mod linear;
pub mod ordered;

pub use linear::LinearIntakeQueue;
pub use ordered::OrderedIntakeQueue;
