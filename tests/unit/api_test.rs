//! Tests for the API surface

use std::sync::Arc;
use std::time::Duration;

use prometheus_dispatch::core::{
    DispatchError, Dispatcher, Placement, ResourcePool,
};
use prometheus_dispatch::infra::queue::LinearIntakeQueue;
use prometheus_dispatch::runtime::api::{
    complaint_status, health, remove_complaint, resolve_complaints, submit_complaint,
    view_complaints, view_history, ComplaintSubmission, ErrorResponse,
};
use prometheus_dispatch::runtime::ManualTimer;

fn dispatcher() -> (Dispatcher<LinearIntakeQueue>, Arc<ManualTimer>) {
    let timer = Arc::new(ManualTimer::new());
    let d = Dispatcher::new(
        LinearIntakeQueue::new(),
        ResourcePool::new(["Vehicle-1"]).unwrap(),
        timer.clone(),
        Duration::from_secs(10),
    )
    .unwrap();
    (d, timer)
}

fn submission(id: &str, description: &str, priority: &str) -> ComplaintSubmission {
    ComplaintSubmission {
        id: Some(id.into()),
        description: Some(description.into()),
        priority: Some(priority.into()),
        location: Some("Station Rd".into()),
    }
}

#[test]
fn test_submit_message() {
    let (d, _) = dispatcher();
    let resp = submit_complaint(&d, submission("1", "Burst pipe", "8")).unwrap();
    assert_eq!(resp.message, "Complaint 'Burst pipe' added with priority 8.");
    assert_eq!(view_complaints(&d).len(), 1);
}

#[test]
fn test_submit_missing_fields() {
    let (d, _) = dispatcher();
    let mut req = submission("1", "Burst pipe", "8");
    req.location = None;
    let err = submit_complaint(&d, req).unwrap_err();
    assert_eq!(
        err,
        DispatchError::InvalidRequest("Please provide id, description, priority, and location.".into())
    );

    let blank = submission("1", "   ", "8");
    assert!(matches!(
        submit_complaint(&d, blank),
        Err(DispatchError::InvalidRequest(_))
    ));
    assert!(view_complaints(&d).is_empty());
}

#[test]
fn test_submit_bad_priority() {
    let (d, _) = dispatcher();
    let err = submit_complaint(&d, submission("1", "Burst pipe", "urgent")).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidRequest(msg) if msg.contains("urgent")));
}

#[test]
fn test_remove_complaint() {
    let (d, _) = dispatcher();
    submit_complaint(&d, submission("1", "Burst pipe", "8")).unwrap();

    let resp = remove_complaint(&d, Some("1")).unwrap();
    assert_eq!(resp.message, "Complaint 'Burst pipe' removed from the queue.");

    let missing = remove_complaint(&d, Some("1")).unwrap_err();
    let body = ErrorResponse::from(&missing);
    assert_eq!(body.code, "not_found");
    assert_eq!(body.message, "Complaint not found.");

    let no_id = remove_complaint(&d, None).unwrap_err();
    assert_eq!(ErrorResponse::from(&no_id).code, "invalid_request");
}

#[test]
fn test_resolve_complaints_flow() {
    let (d, timer) = dispatcher();
    let empty = resolve_complaints(&d);
    assert_eq!(empty.message, "No complaints to resolve.");
    assert!(empty.assigned.is_empty());

    submit_complaint(&d, submission("1", "Burst pipe", "8")).unwrap();
    submit_complaint(&d, submission("2", "Fallen tree", "3")).unwrap();
    let started = resolve_complaints(&d);
    assert_eq!(
        started.message,
        "Started resolving complaints based on priority and vehicle availability."
    );
    assert_eq!(started.assigned.len(), 1);
    assert_eq!(complaint_status(&d, "2").unwrap().placement, Placement::Waiting);

    let not_cancelable = remove_complaint(&d, Some("2")).unwrap_err();
    assert_eq!(ErrorResponse::from(&not_cancelable).code, "not_cancelable");

    timer.fire_all();
    let history: Vec<_> = view_history(&d).into_iter().map(|i| i.id).collect();
    assert_eq!(history, ["1", "2"]);

    let status = health(&d);
    assert!(status.ok);
    assert_eq!(status.stats.resolved, 2);
    assert_eq!(status.stats.free_resources, 1);
}

#[test]
fn test_duplicate_error_response() {
    let (d, _) = dispatcher();
    submit_complaint(&d, submission("1", "Burst pipe", "8")).unwrap();
    let err = submit_complaint(&d, submission("1", "Burst pipe", "8")).unwrap_err();
    let body = ErrorResponse::from(&err);
    assert_eq!(body.code, "duplicate_id");
    assert!(body.message.contains('1'));
}
