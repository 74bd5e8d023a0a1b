//! Future wrappers for callback-driven operations.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Every completion handle of a map was dropped before the map finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ordered map abandoned: a worker dropped its completion handle")]
pub struct MapAbandoned;

/// Results of a [`map_deferred`](super::map_deferred) call.
/// Wraps a oneshot receiver and implements Future so it can be awaited.
pub struct PendingResults<R> {
    receiver: oneshot::Receiver<Vec<R>>,
}

impl<R> PendingResults<R> {
    /// Create a new `PendingResults` from a oneshot receiver
    #[must_use]
    pub fn new(receiver: oneshot::Receiver<Vec<R>>) -> Self {
        Self { receiver }
    }
}

impl<R> Future for PendingResults<R> {
    type Output = Result<Vec<R>, MapAbandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(results)) => Poll::Ready(Ok(results)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(MapAbandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}
