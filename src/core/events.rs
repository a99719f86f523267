//! Lifecycle events and the sinks that receive them.
//!
//! Sinks are called inside the dispatcher's critical section, in the same
//! order as the transitions that produced the events. They must return
//! quickly; anything slow (files, databases, network) belongs behind
//! [`ChannelEventSink`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::WorkItem;
use crate::util::clock::now_ms;
use crate::util::serde::ResourceId;

/// A resource was bound to a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Item snapshot after the transition to in progress.
    pub item: WorkItem,
    /// Assigned resource.
    pub resource: ResourceId,
}

/// A work item finished service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Item snapshot after the transition to resolved.
    pub item: WorkItem,
    /// Resource that served the item and is now free.
    pub resource: ResourceId,
}

/// Lifecycle event emitted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// Item moved to in progress.
    Assigned(Assignment),
    /// Item moved to resolved.
    Resolved(Resolution),
}

impl DispatchEvent {
    /// Item the event is about.
    #[must_use]
    pub const fn item(&self) -> &WorkItem {
        match self {
            Self::Assigned(a) => &a.item,
            Self::Resolved(r) => &r.item,
        }
    }

    /// Resource the event is about.
    #[must_use]
    pub fn resource(&self) -> &str {
        match self {
            Self::Assigned(a) => &a.resource,
            Self::Resolved(r) => &r.resource,
        }
    }

    /// Short action label, `assigned` or `resolved`.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Assigned(_) => "assigned",
            Self::Resolved(_) => "resolved",
        }
    }
}

/// Event record with an id and a timestamp, as kept by [`InMemoryEventSink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record id.
    pub event_id: String,
    /// Time the sink received the event, ms since epoch.
    pub recorded_at_ms: u128,
    /// The event.
    pub event: DispatchEvent,
}

/// Build an event record stamped with a fresh id and the current time.
#[must_use]
pub fn build_event_record(event: DispatchEvent) -> EventRecord {
    EventRecord {
        event_id: uuid::Uuid::new_v4().to_string(),
        recorded_at_ms: now_ms(),
        event,
    }
}

/// Receiver of dispatcher lifecycle events.
pub trait EventSink: Send {
    /// Record an event. Must not block.
    fn record(&mut self, event: &DispatchEvent);
}

/// Bounded in-memory sink. Clones share the same buffer, so a caller can keep
/// one handle for inspection and hand another to the dispatcher.
#[derive(Clone)]
pub struct InMemoryEventSink {
    records: Arc<Mutex<VecDeque<EventRecord>>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a sink keeping at most `max_events`, dropping the oldest first.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Snapshot of stored records.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Snapshot of stored events without record metadata.
    #[must_use]
    pub fn events(&self) -> Vec<DispatchEvent> {
        self.records.lock().iter().map(|r| r.event.clone()).collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drop all stored records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&mut self, event: &DispatchEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut records = self.records.lock();
        if records.len() >= self.max_events {
            records.pop_front();
        }
        records.push_back(build_event_record(event.clone()));
    }
}

/// Sink writing one structured log line per event.
///
/// Runs under the dispatcher lock; see [`ChannelEventSink`] for moving slow
/// consumers off it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&mut self, event: &DispatchEvent) {
        let item = event.item();
        match event {
            DispatchEvent::Assigned(a) => tracing::info!(
                item_id = %item.id,
                resource = %a.resource,
                priority = item.priority,
                location = %item.location,
                "assigned {} to complaint '{}' with priority {}",
                a.resource,
                item.description,
                item.priority
            ),
            DispatchEvent::Resolved(r) => tracing::info!(
                item_id = %item.id,
                resource = %r.resource,
                priority = item.priority,
                location = %item.location,
                "complaint '{}' resolved, {} is now available",
                item.description,
                r.resource
            ),
        }
    }
}

/// Sink forwarding events into an unbounded tokio channel, for persistence
/// layers that do their own I/O off the dispatcher lock.
#[cfg(feature = "tokio-runtime")]
pub struct ChannelEventSink {
    tx: tokio::sync::mpsc::UnboundedSender<DispatchEvent>,
}

#[cfg(feature = "tokio-runtime")]
impl ChannelEventSink {
    /// Create a sink and the receiving half of its channel.
    #[must_use]
    pub fn channel() -> (Self, tokio::sync::mpsc::UnboundedReceiver<DispatchEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[cfg(feature = "tokio-runtime")]
impl EventSink for ChannelEventSink {
    fn record(&mut self, event: &DispatchEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::debug!("event receiver dropped, discarding {} event", event.action());
        }
    }
}
