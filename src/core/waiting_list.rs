//! FIFO holding area for admitted items that found no free resource.

use std::collections::VecDeque;

use crate::core::WorkItem;

/// Strict FIFO of waiting work items. Priority never reorders entries.
#[derive(Debug, Default, Clone)]
pub struct WaitingList {
    items: VecDeque<WorkItem>,
}

impl WaitingList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub fn enqueue(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    /// Append a batch, keeping its order.
    pub fn extend<I: IntoIterator<Item = WorkItem>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Remove and return the head.
    pub fn dequeue_oldest(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    /// Whether an item with `id` is waiting.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Look up a waiting item.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ordered snapshot, head first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.items.iter().cloned().collect()
    }

    /// Number of waiting items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
