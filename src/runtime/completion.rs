//! Ordered fan-out/fan-in driven by completion handles.
//!
//! `map_with_completion` dispatches a worker per item and hands each one a
//! [`Completion`] for its position. Workers may complete right away, later
//! from another task, or in any order; the final callback sees the results in
//! dispatch order and runs exactly once.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::async_wrappers::PendingResults;
use super::slots::ResultSlots;

type OnComplete<R> = Box<dyn FnOnce(Vec<R>) + Send>;

/// State of one map invocation, shared only by its own completion handles
struct MapState<R> {
    slots: ResultSlots<R>,
    /// Set while the dispatch loop runs, so a worker completing synchronously
    /// cannot finish the map before later items are dispatched
    dispatching: bool,
    on_complete: Option<OnComplete<R>>,
}

impl<R> MapState<R> {
    fn take_finished(&mut self) -> Option<(OnComplete<R>, Vec<R>)> {
        if self.dispatching || !self.slots.is_full() {
            return None;
        }
        let on_complete = self.on_complete.take()?;
        Some((on_complete, self.slots.take()))
    }
}

fn finish<R>(finished: Option<(OnComplete<R>, Vec<R>)>) {
    // Called with the lock released: the callback may start another map.
    if let Some((on_complete, results)) = finished {
        on_complete(results);
    }
}

/// Handle a worker uses to report the result for its position
///
/// Completing consumes the handle, so a position can only report once.
/// Dropping a handle without completing it means the map never finishes;
/// that is the worker's responsibility and is not detected here (see
/// [`map_deferred`] for a variant that notices when every handle is gone).
pub struct Completion<R> {
    index: usize,
    state: Arc<Mutex<MapState<R>>>,
}

impl<R> Completion<R> {
    /// Position of the item this handle was dispatched for
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Report the result for this position
    pub fn complete(self, value: R) {
        let finished = {
            let mut state = self.state.lock();
            state.slots.fill(self.index, value);
            state.take_finished()
        };
        finish(finished);
    }
}

impl<R> fmt::Debug for Completion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Apply `worker` to every item and call `on_complete` once with all results
///
/// The items are collected before the first dispatch, so the number of
/// dispatches and the index of each item are fixed at call time no matter
/// what the workers do to the caller's own collection. Workers are invoked
/// eagerly in index order. `on_complete` receives exactly one result per
/// item, in item order, after every handle has completed and the dispatch
/// loop has ended. With no items it runs before this function returns.
pub fn map_with_completion<T, R, I, W, C>(items: I, mut worker: W, on_complete: C)
where
    I: IntoIterator<Item = T>,
    W: FnMut(T, Completion<R>),
    C: FnOnce(Vec<R>) + Send + 'static,
    R: Send + 'static,
{
    let snapshot: Vec<T> = items.into_iter().collect();

    let state = Arc::new(Mutex::new(MapState {
        slots: ResultSlots::new(snapshot.len()),
        dispatching: true,
        on_complete: Some(Box::new(on_complete)),
    }));

    for (index, item) in snapshot.into_iter().enumerate() {
        worker(
            item,
            Completion {
                index,
                state: Arc::clone(&state),
            },
        );
    }

    let finished = {
        let mut state = state.lock();
        state.dispatching = false;
        state.take_finished()
    };
    finish(finished);
}

/// Like [`map_with_completion`], but the results are delivered through a
/// future instead of a callback
///
/// The future resolves to `Err(MapAbandoned)` if every outstanding handle was
/// dropped without completing.
pub fn map_deferred<T, R, I, W>(items: I, worker: W) -> PendingResults<R>
where
    I: IntoIterator<Item = T>,
    W: FnMut(T, Completion<R>),
    R: Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    map_with_completion(items, worker, move |results| {
        let _ = tx.send(results);
    });

    PendingResults::new(rx)
}
