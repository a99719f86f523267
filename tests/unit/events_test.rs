//! Tests for event sinks

use prometheus_dispatch::core::{
    build_event_record, Assignment, DispatchEvent, EventSink, InMemoryEventSink, NewWorkItem,
    Resolution, TracingEventSink, WorkItem,
};

fn assigned(id: &str) -> DispatchEvent {
    let item = WorkItem::pending_at(NewWorkItem::new(id, "broken light", 4, "Pier 3"), 1);
    DispatchEvent::Assigned(Assignment {
        item,
        resource: "Vehicle-1".into(),
    })
}

#[test]
fn test_in_memory_sink_shared_between_clones() {
    let reader = InMemoryEventSink::new(10);
    let mut writer = reader.clone();

    writer.record(&assigned("c1"));
    assert_eq!(reader.len(), 1);

    let records = reader.records();
    assert_eq!(records[0].event.item().id, "c1");
    assert_eq!(records[0].event.action(), "assigned");
    assert!(!records[0].event_id.is_empty());
}

#[test]
fn test_in_memory_sink_overflow() {
    let mut sink = InMemoryEventSink::new(2);

    sink.record(&assigned("c1"));
    sink.record(&assigned("c2"));
    sink.record(&assigned("c3"));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].item().id, "c2"); // First one popped
    assert_eq!(events[1].item().id, "c3");
}

#[test]
fn test_zero_capacity_sink_keeps_nothing() {
    let mut sink = InMemoryEventSink::new(0);
    sink.record(&assigned("c1"));
    assert!(sink.is_empty());
}

#[test]
fn test_build_event_record() {
    let first = build_event_record(assigned("c1"));
    let second = build_event_record(assigned("c1"));
    assert_ne!(first.event_id, second.event_id);
    assert!(first.recorded_at_ms > 0);
    assert_eq!(first.event.resource(), "Vehicle-1");
}

#[test]
fn test_event_serializes_with_kind_tag() {
    let item = WorkItem::pending_at(NewWorkItem::new("c9", "graffiti", 2, "Mill Ln"), 5);
    let event = DispatchEvent::Resolved(Resolution {
        item,
        resource: "Vehicle-2".into(),
    });
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"], "resolved");
    assert_eq!(json["resource"], "Vehicle-2");
    assert_eq!(json["item"]["id"], "c9");
}

#[test]
fn test_tracing_sink_accepts_events() {
    let mut sink = TracingEventSink;
    sink.record(&assigned("c1"));
}
