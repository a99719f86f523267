//! Identifier and priority types shared across the crate.

/// Caller-supplied work item identifier.
pub type ItemId = String;

/// Resource (vehicle) identifier.
pub type ResourceId = String;

/// Work item priority. Higher values are more urgent.
pub type Priority = i64;
