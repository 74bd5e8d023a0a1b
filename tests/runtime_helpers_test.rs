use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rasterize_inline::runtime::{
    MapAbandoned, map_deferred, map_ordered, map_ordered_bounded, map_with_completion,
};

#[tokio::test]
async fn test_completions_from_spawned_tasks_keep_input_order() {
    let pending = map_deferred(1..=5u64, |value, done| {
        // Later items finish first.
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5 * (6 - value))).await;
            done.complete(value * 10);
        });
    });

    assert_eq!(pending.await.unwrap(), vec![10, 20, 30, 40, 50]);
}

#[tokio::test]
async fn test_dropped_handles_abandon_the_map() {
    let pending = map_deferred(vec!["a", "b"], |item, done| {
        if item == "a" {
            done.complete(item.len());
        } else {
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                drop(done);
            });
        }
    });

    assert_eq!(pending.await, Err(MapAbandoned));
}

#[tokio::test]
async fn test_callback_runs_once_after_mixed_completion() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let (tx, rx) = tokio::sync::oneshot::channel();

    map_with_completion(
        vec![1, 2, 3],
        |value, done| {
            if value == 2 {
                tokio::spawn(async move { done.complete(value) });
            } else {
                done.complete(value);
            }
        },
        move |results| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(results);
        },
    );

    assert_eq!(rx.await.unwrap(), vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bounded_and_unbounded_agree() {
    let work = |value: u64| async move {
        tokio::time::sleep(Duration::from_millis(value % 3)).await;
        value * value
    };

    let unbounded = map_ordered(0..20, work).await;
    let bounded = map_ordered_bounded(0..20, 3, work).await;

    assert_eq!(unbounded, bounded);
    assert_eq!(unbounded[19], 361);
}
