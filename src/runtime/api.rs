//! API-facing request/response models for binding the dispatcher to a transport.

use serde::{Deserialize, Serialize};

use crate::core::{
    Assignment, DispatchError, DispatchStats, Dispatcher, IntakeQueue, ItemView, NewWorkItem,
    WorkItem,
};

/// Complaint submission as received from a caller. All fields are optional
/// strings so that missing or malformed input is reported uniformly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintSubmission {
    /// Complaint identifier.
    pub id: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Priority as text; must parse as an integer.
    pub priority: Option<String>,
    /// Location.
    pub location: Option<String>,
}

/// Plain message response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a dispatch trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Human-readable message.
    pub message: String,
    /// Assignments made by this trigger.
    pub assigned: Vec<Assignment>,
}

/// Error payload with a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code, e.g. `not_found`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&DispatchError> for ErrorResponse {
    fn from(err: &DispatchError) -> Self {
        let (code, message) = match err {
            DispatchError::DuplicateId(_) => ("duplicate_id", err.to_string()),
            DispatchError::NotFound(_) => ("not_found", "Complaint not found.".to_string()),
            DispatchError::NotCancelable { .. } => ("not_cancelable", err.to_string()),
            DispatchError::InvalidRequest(msg) => ("invalid_request", msg.clone()),
            DispatchError::UnknownResource(_)
            | DispatchError::ResourceMismatch { .. }
            | DispatchError::InvalidConfig(_) => ("internal", err.to_string()),
        };
        Self {
            code: code.to_string(),
            message,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Current counts.
    pub stats: DispatchStats,
}

fn required(field: Option<&String>) -> Option<&str> {
    field.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl ComplaintSubmission {
    /// Validate and convert into a work item request.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if a field is missing or blank, or the priority is not
    /// an integer.
    pub fn into_new_item(self) -> Result<NewWorkItem, DispatchError> {
        let (Some(id), Some(description), Some(priority), Some(location)) = (
            required(self.id.as_ref()),
            required(self.description.as_ref()),
            required(self.priority.as_ref()),
            required(self.location.as_ref()),
        ) else {
            return Err(DispatchError::InvalidRequest(
                "Please provide id, description, priority, and location.".into(),
            ));
        };
        let priority = priority.parse().map_err(|_| {
            DispatchError::InvalidRequest(format!("priority must be an integer, got `{priority}`"))
        })?;
        Ok(NewWorkItem::new(id, description, priority, location))
    }
}

/// Submit a complaint.
///
/// # Errors
///
/// `InvalidRequest` for malformed input, `DuplicateId` if already tracked.
pub fn submit_complaint<Q>(
    dispatcher: &Dispatcher<Q>,
    req: ComplaintSubmission,
) -> Result<MessageResponse, DispatchError>
where
    Q: IntakeQueue + 'static,
{
    let item = dispatcher.submit(req.into_new_item()?)?;
    Ok(MessageResponse::new(format!(
        "Complaint '{}' added with priority {}.",
        item.description, item.priority
    )))
}

/// Remove a complaint that has not been dispatched yet.
///
/// # Errors
///
/// `InvalidRequest` without an id, otherwise as [`Dispatcher::cancel`].
pub fn remove_complaint<Q>(
    dispatcher: &Dispatcher<Q>,
    id: Option<&str>,
) -> Result<MessageResponse, DispatchError>
where
    Q: IntakeQueue + 'static,
{
    let id = id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DispatchError::InvalidRequest("Please provide complaint id.".into()))?;
    let item = dispatcher.cancel(id)?;
    Ok(MessageResponse::new(format!(
        "Complaint '{}' removed from the queue.",
        item.description
    )))
}

/// Trigger a dispatch cycle.
pub fn resolve_complaints<Q>(dispatcher: &Dispatcher<Q>) -> DispatchResponse
where
    Q: IntakeQueue + 'static,
{
    if dispatcher.snapshot().pending == 0 {
        return DispatchResponse {
            message: "No complaints to resolve.".into(),
            assigned: Vec::new(),
        };
    }
    let assigned = dispatcher.dispatch_cycle();
    DispatchResponse {
        message: "Started resolving complaints based on priority and vehicle availability.".into(),
        assigned,
    }
}

/// Complaints still in the intake queue, highest priority first.
pub fn view_complaints<Q>(dispatcher: &Dispatcher<Q>) -> Vec<WorkItem>
where
    Q: IntakeQueue + 'static,
{
    dispatcher.list_pending()
}

/// Resolved complaints in resolution order.
pub fn view_history<Q>(dispatcher: &Dispatcher<Q>) -> Vec<WorkItem>
where
    Q: IntakeQueue + 'static,
{
    dispatcher.list_history()
}

/// Look up one complaint.
///
/// # Errors
///
/// `NotFound` for unknown ids.
pub fn complaint_status<Q>(dispatcher: &Dispatcher<Q>, id: &str) -> Result<ItemView, DispatchError>
where
    Q: IntakeQueue + 'static,
{
    dispatcher.status(id)
}

/// Return a health payload.
pub fn health<Q>(dispatcher: &Dispatcher<Q>) -> Health
where
    Q: IntakeQueue + 'static,
{
    Health {
        ok: true,
        stats: dispatcher.snapshot(),
    }
}
