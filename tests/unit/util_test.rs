//! Tests for utility functions

use prometheus_dispatch::util::{init_tracing, now_ms, ItemId, Priority};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized twice");
}

#[test]
fn test_now_ms_advances() {
    let first = now_ms();
    let second = now_ms();
    assert!(first > 0);
    assert!(second >= first);
}

#[test]
fn test_id_and_priority_aliases() {
    let id: ItemId = "c-1".to_string();
    let priority: Priority = -3;
    assert_eq!(id, "c-1");
    assert!(priority < 0);
}
