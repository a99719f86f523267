//! Core dispatch abstractions: work items, resource pool, queues and the dispatcher.

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod history;
pub mod intake;
pub mod resource_pool;
pub mod timer;
pub mod waiting_list;
pub mod work_item;

pub use dispatcher::{Completion, DispatchStats, Dispatcher};
pub use error::{AppResult, DispatchError};
#[cfg(feature = "tokio-runtime")]
pub use events::ChannelEventSink;
pub use events::{
    build_event_record, Assignment, DispatchEvent, EventRecord, EventSink, InMemoryEventSink,
    Resolution, TracingEventSink,
};
pub use history::ResolvedHistory;
pub use intake::IntakeQueue;
pub use resource_pool::ResourcePool;
pub use timer::{CompletionCallback, CompletionTimer, Spawn};
pub use waiting_list::WaitingList;
pub use work_item::{ItemView, NewWorkItem, Placement, WorkItem, WorkStatus};
