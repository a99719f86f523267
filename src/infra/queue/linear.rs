//! Intake queue kept as a sorted `VecDeque` with a linear insertion scan.

use std::collections::VecDeque;

use crate::core::{DispatchError, IntakeQueue, WorkItem};

/// Intake queue that inserts by scanning from the front.
///
/// O(n) submit and removal, O(1) pop. Suits the small queues a handful of
/// vehicles produce.
#[derive(Debug, Default)]
pub struct LinearIntakeQueue {
    items: VecDeque<WorkItem>,
}

impl LinearIntakeQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntakeQueue for LinearIntakeQueue {
    fn submit(&mut self, item: WorkItem) -> Result<(), DispatchError> {
        if self.contains(&item.id) {
            return Err(DispatchError::DuplicateId(item.id));
        }
        // First occupant with strictly lower priority; equal priorities stay ahead.
        let pos = self
            .items
            .iter()
            .position(|queued| queued.priority < item.priority)
            .unwrap_or(self.items.len());
        self.items.insert(pos, item);
        Ok(())
    }

    fn remove_by_id(&mut self, id: &str) -> Option<WorkItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(pos)
    }

    fn pop_highest(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    fn peek_all(&self) -> Vec<WorkItem> {
        self.items.iter().cloned().collect()
    }

    fn get(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn drain_all(&mut self) -> Vec<WorkItem> {
        self.items.drain(..).collect()
    }
}
