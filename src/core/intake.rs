//! Priority intake queue abstraction.

use crate::core::{DispatchError, WorkItem};

/// Pending work ordered by descending priority, first-submitted first among ties.
///
/// Backends live in [`crate::infra::queue`] and must agree exactly on this
/// ordering: a new item goes before the first occupant whose priority is
/// strictly lower, otherwise at the end.
pub trait IntakeQueue: Send {
    /// Insert a pending item.
    ///
    /// # Errors
    ///
    /// `DuplicateId` if an item with the same id is already queued.
    fn submit(&mut self, item: WorkItem) -> Result<(), DispatchError>;
    /// Remove and return the queued item with `id`.
    fn remove_by_id(&mut self, id: &str) -> Option<WorkItem>;
    /// Remove and return the front item.
    fn pop_highest(&mut self) -> Option<WorkItem>;
    /// Ordered snapshot, front first.
    fn peek_all(&self) -> Vec<WorkItem>;
    /// Look up a queued item.
    fn get(&self, id: &str) -> Option<&WorkItem>;
    /// Current depth.
    fn len(&self) -> usize;

    /// Whether an item with `id` is queued.
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every item, front first.
    fn drain_all(&mut self) -> Vec<WorkItem> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.pop_highest() {
            out.push(item);
        }
        out
    }
}

impl<Q: IntakeQueue + ?Sized> IntakeQueue for Box<Q> {
    fn submit(&mut self, item: WorkItem) -> Result<(), DispatchError> {
        (**self).submit(item)
    }

    fn remove_by_id(&mut self, id: &str) -> Option<WorkItem> {
        (**self).remove_by_id(id)
    }

    fn pop_highest(&mut self) -> Option<WorkItem> {
        (**self).pop_highest()
    }

    fn peek_all(&self) -> Vec<WorkItem> {
        (**self).peek_all()
    }

    fn get(&self, id: &str) -> Option<&WorkItem> {
        (**self).get(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn drain_all(&mut self) -> Vec<WorkItem> {
        (**self).drain_all()
    }
}
