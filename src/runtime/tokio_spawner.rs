//! Tokio runtime spawner implementation.

use std::future::Future;
use std::sync::Arc;

use crate::core::{DispatchError, Spawn};

/// Tokio-based spawner that runs completion timers on a tokio runtime.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Arc<tokio::runtime::Handle>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` from a tokio runtime handle.
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Create a `TokioSpawner` on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when called outside a tokio runtime.
    pub fn current() -> Result<Self, DispatchError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| DispatchError::InvalidConfig(format!("no tokio runtime: {e}")))?;
        Ok(Self::new(handle))
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(fut);
    }
}
