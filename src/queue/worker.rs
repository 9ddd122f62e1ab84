//! Worker loop pulling items and invoking the action
//!
//! Each worker is a tokio task. All action execution happens here, never on
//! a producer's task, so a single-worker configuration needs no internal
//! synchronisation inside the handler. Panics are caught at the per-item
//! boundary so one bad item cannot kill the loop.

use crate::latch::Latch;
use crate::queue::channel::WorkReceiver;
use crate::queue::error::{QueueError, WorkError};
use crate::queue::sink::ErrorSink;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Boxed future produced by one action invocation
pub(crate) type ActionFuture = Pin<Box<dyn Future<Output = Result<(), WorkError>> + Send>>;

/// Type-erased action shared by all worker tasks
pub(crate) type WorkAction<T> = Arc<dyn Fn(T) -> ActionFuture + Send + Sync>;

/// Receiver shared between worker tasks
///
/// The mpsc receiver is single-consumer; fan-out to N workers serialises
/// the pull itself behind an async mutex while item processing overlaps.
pub(crate) type SharedReceiver<T> = Arc<Mutex<WorkReceiver<T>>>;

/// Run one worker until the pending-work buffer is closed and drained
///
/// `remaining` counts the live workers of the current cycle; the last one
/// to exit commits the latch `Stopped`. Tying the commit to the workers
/// rather than the closer means the drain finishes even when the closing
/// future is dropped at a `close_timeout` deadline.
pub(crate) async fn run_worker<T: Send + 'static>(
    worker_id: usize,
    receiver: SharedReceiver<T>,
    action: WorkAction<T>,
    latch: Arc<Latch>,
    sink: Arc<dyn ErrorSink>,
    remaining: Arc<AtomicUsize>,
) {
    // First worker to arrive commits Starting -> Running; for the rest the
    // transition is a no-op
    latch.started();
    log::trace!("Worker {} consuming", worker_id);

    loop {
        // Hold the receiver lock only for the pull so sibling workers can
        // interleave between items
        let item = { receiver.lock().await.recv().await };
        let item = match item {
            Some(item) => item,
            None => break, // buffer closed and fully drained
        };

        // The action call itself runs inside the guard: a panic in its
        // synchronous prelude hits the same per-item boundary as one
        // raised mid-await
        match AssertUnwindSafe(async { action(item).await })
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => sink.report(err).await,
            Err(payload) => {
                let message = panic_message(payload);
                log::warn!("Worker {} caught action panic: {}", worker_id, message);
                sink.report(Box::new(QueueError::ActionPanic { message }))
                    .await;
            }
        }
    }

    if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
        latch.stopped();
    }
    log::trace!("Worker {} exited", worker_id);
}

/// Extract a printable message from a caught panic payload
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
