//! Resolved work item history.

use std::collections::HashMap;

use crate::core::WorkItem;

/// Append-only record of resolved items, most recent last.
///
/// Resolved ids may be submitted again, so one id can appear more than once.
#[derive(Debug, Default, Clone)]
pub struct ResolvedHistory {
    items: Vec<WorkItem>,
    latest_by_id: HashMap<String, usize>,
}

impl ResolvedHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved item.
    pub fn push(&mut self, item: WorkItem) {
        self.latest_by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item);
    }

    /// Most recently resolved item.
    #[must_use]
    pub fn latest(&self) -> Option<&WorkItem> {
        self.items.last()
    }

    /// Most recent resolution of `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.latest_by_id.get(id).map(|idx| &self.items[*idx])
    }

    /// Snapshot in resolution order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.items.clone()
    }

    /// Number of resolutions recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
