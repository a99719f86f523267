//! Completion timer implementations.

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{CompletionCallback, CompletionTimer};
#[cfg(feature = "tokio-runtime")]
use crate::core::Spawn;

/// Timer that spawns one sleeping task per scheduled completion.
#[cfg(feature = "tokio-runtime")]
#[derive(Clone)]
pub struct SpawnTimer<S> {
    spawner: S,
}

#[cfg(feature = "tokio-runtime")]
impl<S> SpawnTimer<S> {
    /// Create a timer that sleeps on tasks spawned by `spawner`.
    pub const fn new(spawner: S) -> Self {
        Self { spawner }
    }
}

#[cfg(feature = "tokio-runtime")]
impl<S> CompletionTimer for SpawnTimer<S>
where
    S: Spawn + Send + Sync,
{
    fn schedule(&self, item_id: &str, after: Duration, fire: CompletionCallback) {
        let item_id = item_id.to_string();
        self.spawner.spawn(async move {
            tokio::time::sleep(after).await;
            tracing::debug!("completion timer fired for {}", item_id);
            fire();
        });
    }
}

/// A completion waiting to be fired by hand.
struct PendingCompletion {
    item_id: String,
    after: Duration,
    fire: CompletionCallback,
}

/// Timer that holds completions until the caller fires them.
///
/// Used to drive the dispatcher deterministically: completions fire in
/// scheduling order via [`ManualTimer::fire_next`], or by item id via
/// [`ManualTimer::fire`].
#[derive(Default)]
pub struct ManualTimer {
    pending: Mutex<VecDeque<PendingCompletion>>,
}

impl ManualTimer {
    /// Create an empty timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Item ids with a scheduled completion, in scheduling order.
    #[must_use]
    pub fn pending(&self) -> Vec<String> {
        self.pending.lock().iter().map(|p| p.item_id.clone()).collect()
    }

    /// Delay requested for the completion of `item_id`.
    #[must_use]
    pub fn delay_of(&self, item_id: &str) -> Option<Duration> {
        self.pending
            .lock()
            .iter()
            .find(|p| p.item_id == item_id)
            .map(|p| p.after)
    }

    /// Fire the completion scheduled for `item_id`. Returns whether one existed.
    pub fn fire(&self, item_id: &str) -> bool {
        let entry = {
            let mut pending = self.pending.lock();
            pending
                .iter()
                .position(|p| p.item_id == item_id)
                .and_then(|pos| pending.remove(pos))
        };
        entry.is_some_and(|p| {
            (p.fire)();
            true
        })
    }

    /// Fire the oldest scheduled completion. Returns its item id.
    pub fn fire_next(&self) -> Option<String> {
        let entry = self.pending.lock().pop_front()?;
        (entry.fire)();
        Some(entry.item_id)
    }

    /// Fire completions until none remain, including ones scheduled while
    /// firing. Returns the item ids in firing order.
    pub fn fire_all(&self) -> Vec<String> {
        let mut fired = Vec::new();
        while let Some(id) = self.fire_next() {
            fired.push(id);
        }
        fired
    }
}

impl CompletionTimer for ManualTimer {
    fn schedule(&self, item_id: &str, after: Duration, fire: CompletionCallback) {
        self.pending.lock().push_back(PendingCompletion {
            item_id: item_id.to_string(),
            after,
            fire,
        });
    }
}
