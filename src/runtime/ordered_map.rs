//! Future-based ordered fan-out/fan-in.
//!
//! Gather every future, keep its index, resolve once when all are done.
//! Completion order never shows up in the output.

use std::future::Future;

use futures::stream::{self, FuturesUnordered, StreamExt};

use super::slots::ResultSlots;

/// Run `worker` on every item concurrently and collect the outputs in item order
///
/// Items are collected up front and every worker is invoked, in index order,
/// before any of the returned futures is polled. The futures are then driven
/// together on the calling task.
pub async fn map_ordered<T, R, I, W, Fut>(items: I, mut worker: W) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    W: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    let snapshot: Vec<T> = items.into_iter().collect();
    let mut slots = ResultSlots::new(snapshot.len());

    let mut in_flight: FuturesUnordered<_> = snapshot
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let work = worker(item);
            async move { (index, work.await) }
        })
        .collect();

    while let Some((index, value)) = in_flight.next().await {
        slots.fill(index, value);
    }

    slots.take()
}

/// Like [`map_ordered`], with at most `limit` futures in flight
///
/// Workers are invoked lazily as capacity frees up, still in index order.
/// A `limit` of zero is treated as one.
pub async fn map_ordered_bounded<T, R, I, W, Fut>(items: I, limit: usize, mut worker: W) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    W: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    let snapshot: Vec<T> = items.into_iter().collect();
    let mut slots = ResultSlots::new(snapshot.len());

    let completions = stream::iter(snapshot.into_iter().enumerate())
        .map(|(index, item)| {
            let work = worker(item);
            async move { (index, work.await) }
        })
        .buffer_unordered(limit.max(1));
    futures::pin_mut!(completions);

    while let Some((index, value)) = completions.next().await {
        slots.fill(index, value);
    }

    slots.take()
}
