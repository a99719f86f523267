//! Runtime seams: task spawning and delayed completion.

use std::future::Future;
use std::time::Duration;

/// Abstraction for spawning work on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Callback fired when a scheduled completion comes due.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Schedules the completion of an assignment after the service duration.
///
/// Scheduled completions cannot be cancelled and must fire exactly once.
/// Implementations must not invoke `fire` synchronously from `schedule`.
pub trait CompletionTimer: Send + Sync {
    /// Arrange for `fire` to run once `after` has elapsed.
    fn schedule(&self, item_id: &str, after: Duration, fire: CompletionCallback);
}
