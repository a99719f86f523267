//! Error types for dispatcher operations.

use thiserror::Error;

use crate::core::work_item::Placement;
use crate::util::serde::{ItemId, ResourceId};

/// Errors produced by dispatcher components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A work item with this id is already queued, waiting or in progress.
    #[error("duplicate work item id: {0}")]
    DuplicateId(ItemId),
    /// No tracked work item has this id.
    #[error("work item not found: {0}")]
    NotFound(ItemId),
    /// The item left the intake queue and can no longer be cancelled.
    #[error("work item {id} cannot be cancelled while {placement}")]
    NotCancelable {
        /// Item identifier.
        id: ItemId,
        /// Where the item currently sits.
        placement: Placement,
    },
    /// Resource id was never registered with the pool.
    #[error("unknown resource: {0}")]
    UnknownResource(ResourceId),
    /// Completion reported for a resource other than the one assigned.
    #[error("work item {id} is assigned to {expected}, not {actual}")]
    ResourceMismatch {
        /// Item identifier.
        id: ItemId,
        /// Resource the item is actually assigned to.
        expected: ResourceId,
        /// Resource named by the caller.
        actual: ResourceId,
    },
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Request from the service layer is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
