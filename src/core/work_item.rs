//! Work item model and lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;
use crate::util::serde::{ItemId, Priority, ResourceId};

/// Status of a work item in the dispatch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    /// Submitted and not yet assigned a resource.
    Pending,
    /// A resource is serving the item.
    InProgress,
    /// Service finished. Terminal.
    Resolved,
}

/// Which collection currently holds a work item.
///
/// `Waiting` is list membership only; such items still report
/// [`WorkStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// In the priority intake queue.
    Queued,
    /// In the FIFO waiting list.
    Waiting,
    /// Assigned to a resource.
    InProgress,
    /// In the resolved history.
    Resolved,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Waiting => "waiting",
            Self::InProgress => "in progress",
            Self::Resolved => "resolved",
        };
        f.write_str(s)
    }
}

/// Fields supplied by the caller when submitting a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkItem {
    /// Caller-chosen identifier.
    pub id: ItemId,
    /// Free-form description.
    pub description: String,
    /// Priority, higher is more urgent.
    pub priority: Priority,
    /// Where the complaint was raised.
    pub location: String,
}

impl NewWorkItem {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<ItemId>,
        description: impl Into<String>,
        priority: Priority,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            priority,
            location: location.into(),
        }
    }
}

/// One complaint and its scheduling state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier among tracked items.
    pub id: ItemId,
    /// Free-form description.
    pub description: String,
    /// Priority, higher is more urgent.
    pub priority: Priority,
    /// Where the complaint was raised.
    pub location: String,
    /// Lifecycle status.
    pub status: WorkStatus,
    /// Resource serving (or that served) the item.
    pub assigned_resource: Option<ResourceId>,
    /// Submission time, ms since epoch.
    pub created_at_ms: u128,
    /// Assignment time, ms since epoch.
    pub assigned_at_ms: Option<u128>,
    /// Resolution time, ms since epoch.
    pub resolved_at_ms: Option<u128>,
}

impl WorkItem {
    /// Create a pending item stamped with the current time.
    #[must_use]
    pub fn pending(new: NewWorkItem) -> Self {
        Self::pending_at(new, now_ms())
    }

    /// Create a pending item with an explicit creation time.
    #[must_use]
    pub fn pending_at(new: NewWorkItem, created_at_ms: u128) -> Self {
        Self {
            id: new.id,
            description: new.description,
            priority: new.priority,
            location: new.location,
            status: WorkStatus::Pending,
            assigned_resource: None,
            created_at_ms,
            assigned_at_ms: None,
            resolved_at_ms: None,
        }
    }

    pub(crate) fn mark_assigned(&mut self, resource: ResourceId, at_ms: u128) {
        self.status = WorkStatus::InProgress;
        self.assigned_resource = Some(resource);
        self.assigned_at_ms = Some(at_ms);
    }

    pub(crate) fn mark_resolved(&mut self, at_ms: u128) {
        self.status = WorkStatus::Resolved;
        self.resolved_at_ms = Some(at_ms);
    }
}

/// A work item together with the collection that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    /// Item snapshot.
    pub item: WorkItem,
    /// Current placement.
    pub placement: Placement,
}
