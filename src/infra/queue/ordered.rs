//! Intake queue backed by an ordered map.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::core::{DispatchError, IntakeQueue, WorkItem};
use crate::util::serde::Priority;

/// Ordering key: highest priority first, then submission sequence.
type QueueKey = (Reverse<Priority>, u64);

/// Intake queue with O(log n) submit, pop and removal.
///
/// Equal priorities are ordered by a monotonically increasing sequence number,
/// giving the same first-submitted-first-served tie-break as
/// [`super::LinearIntakeQueue`].
#[derive(Debug, Default)]
pub struct OrderedIntakeQueue {
    items: BTreeMap<QueueKey, WorkItem>,
    keys: HashMap<String, QueueKey>,
    next_seq: u64,
}

impl OrderedIntakeQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntakeQueue for OrderedIntakeQueue {
    fn submit(&mut self, item: WorkItem) -> Result<(), DispatchError> {
        if self.keys.contains_key(&item.id) {
            return Err(DispatchError::DuplicateId(item.id));
        }
        let key = (Reverse(item.priority), self.next_seq);
        self.next_seq += 1;
        self.keys.insert(item.id.clone(), key);
        self.items.insert(key, item);
        Ok(())
    }

    fn remove_by_id(&mut self, id: &str) -> Option<WorkItem> {
        let key = self.keys.remove(id)?;
        self.items.remove(&key)
    }

    fn pop_highest(&mut self) -> Option<WorkItem> {
        let (_, item) = self.items.pop_first()?;
        self.keys.remove(&item.id);
        Some(item)
    }

    fn peek_all(&self) -> Vec<WorkItem> {
        self.items.values().cloned().collect()
    }

    fn get(&self, id: &str) -> Option<&WorkItem> {
        self.keys.get(id).and_then(|key| self.items.get(key))
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn drain_all(&mut self) -> Vec<WorkItem> {
        self.keys.clear();
        std::mem::take(&mut self.items).into_values().collect()
    }
}
