//! Tests for error types

use prometheus_dispatch::core::{DispatchError, Placement};

#[test]
fn test_duplicate_id_error() {
    let err = DispatchError::DuplicateId("c-7".to_string());
    assert_eq!(format!("{}", err), "duplicate work item id: c-7");
}

#[test]
fn test_not_found_error() {
    let err = DispatchError::NotFound("c-7".to_string());
    assert_eq!(format!("{}", err), "work item not found: c-7");
}

#[test]
fn test_not_cancelable_error() {
    let err = DispatchError::NotCancelable {
        id: "c-7".to_string(),
        placement: Placement::InProgress,
    };
    assert_eq!(format!("{}", err), "work item c-7 cannot be cancelled while in progress");
}

#[test]
fn test_unknown_resource_error() {
    let err = DispatchError::UnknownResource("Vehicle-9".to_string());
    assert_eq!(format!("{}", err), "unknown resource: Vehicle-9");
}

#[test]
fn test_resource_mismatch_error() {
    let err = DispatchError::ResourceMismatch {
        id: "c-1".into(),
        expected: "Vehicle-1".into(),
        actual: "Vehicle-2".into(),
    };
    assert_eq!(format!("{}", err), "work item c-1 is assigned to Vehicle-1, not Vehicle-2");
}
