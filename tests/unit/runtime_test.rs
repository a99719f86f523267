//! Tests for tokio spawner and completion timers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use prometheus_dispatch::core::{CompletionTimer, Spawn};
use prometheus_dispatch::runtime::tokio_spawner::TokioSpawner;
use prometheus_dispatch::runtime::ManualTimer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_tokio_spawner_outside_runtime() {
    assert!(TokioSpawner::current().is_err());
}

#[test]
fn test_manual_timer_fires_once_in_order() {
    let timer = ManualTimer::new();
    let fired = Arc::new(AtomicUsize::new(0));

    for id in ["a", "b", "c"] {
        let fired = Arc::clone(&fired);
        timer.schedule(
            id,
            Duration::from_secs(1),
            Box::new(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }),
        );
    }
    assert_eq!(timer.pending(), ["a", "b", "c"]);

    assert!(timer.fire("b"));
    assert!(!timer.fire("b"));
    assert_eq!(timer.fire_next().as_deref(), Some("a"));
    assert_eq!(timer.fire_all(), ["c"]);
    assert!(timer.fire_next().is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}

#[test]
fn test_manual_timer_callback_may_schedule() {
    let timer = Arc::new(ManualTimer::new());
    let inner = Arc::clone(&timer);
    timer.schedule(
        "first",
        Duration::from_secs(1),
        Box::new(move || inner.schedule("second", Duration::from_secs(1), Box::new(|| {}))),
    );

    assert_eq!(timer.fire_all(), ["first", "second"]);
}
