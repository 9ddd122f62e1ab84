//! Internal Queue implementation bridging producers and the worker loop
//!
//! The queue owns the pending-work channel, the worker task handles and the
//! lifecycle latch. Producers only ever touch a cloned sender; the worker
//! tasks own the receiver; `start`/`close` coordinate exclusively through
//! the latch and the inner mutex, so callers never need an external lock.

use crate::latch::{Latch, LatchState};
use crate::queue::channel::{work_channel, TrySendFailure, WorkReceiver, WorkSender};
use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult, WorkError};
use crate::queue::sink::{ErrorSink, LogSink};
use crate::queue::worker::{run_worker, ActionFuture, SharedReceiver, WorkAction};
use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

struct QueueInner<T> {
    /// Producer side; `None` once a close has been initiated
    sender: Option<WorkSender<T>>,
    /// Consumer side; taken by `start`, recreated on restart
    receiver: Option<WorkReceiver<T>>,
    /// Handles of the spawned worker tasks for the current cycle
    workers: Vec<JoinHandle<()>>,
}

/// Lifecycle-controlled work queue
///
/// Decouples any number of concurrent producers from a worker loop that
/// invokes a user-supplied action once per item. Items are processed in
/// arrival order, non-overlapping, when a single worker is configured (the
/// default).
///
/// The queue may be restarted after [`close`](Queue::close): a new cycle
/// begins with a fresh buffer. Items enqueued between a close and the next
/// start fail with [`QueueError::Closed`] rather than being dropped
/// silently.
///
/// # Thread Safety
///
/// All operations take `&self` and are safe for concurrent invocation;
/// share the queue across tasks with `Arc<Queue<T>>`.
///
/// # Example
///
/// ```rust,no_run
/// use workqueue::queue::{Queue, WorkError};
///
/// # async fn example() -> Result<(), workqueue::queue::QueueError> {
/// let queue = Queue::new(|item: String| async move {
///     log::info!("delivering {}", item);
///     Ok::<(), WorkError>(())
/// });
///
/// queue.start().await?;
/// queue.enqueue("hello".to_string()).await?;
/// queue.close().await?;
/// assert!(!queue.latch().is_running());
/// # Ok(())
/// # }
/// ```
pub struct Queue<T> {
    action: WorkAction<T>,
    latch: Arc<Latch>,
    sink: Arc<dyn ErrorSink>,
    config: QueueConfig,
    inner: Mutex<QueueInner<T>>,
}

impl<T: Send + 'static> Queue<T> {
    /// Create a queue with the default configuration (bounded buffer,
    /// single worker)
    ///
    /// The action receives each work item exactly once; a returned error is
    /// routed to the error sink and never stops the worker loop.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), WorkError>> + Send + 'static,
    {
        Self::with_config(action, QueueConfig::default())
    }

    /// Create a queue with an explicit configuration
    pub fn with_config<F, Fut>(action: F, config: QueueConfig) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), WorkError>> + Send + 'static,
    {
        let (sender, receiver) = work_channel(config.capacity);
        Self {
            action: Arc::new(move |item| -> ActionFuture { Box::pin(action(item)) }),
            latch: Arc::new(Latch::new()),
            sink: Arc::new(LogSink),
            config,
            inner: Mutex::new(QueueInner {
                sender: Some(sender),
                receiver: Some(receiver),
                workers: Vec::new(),
            }),
        }
    }

    /// Replace the default log-backed error sink
    ///
    /// Intended for wiring before the first `start`.
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get the lifecycle latch for external state inspection
    pub fn latch(&self) -> Arc<Latch> {
        Arc::clone(&self.latch)
    }

    /// Append a work item to the pending buffer
    ///
    /// Safe for unbounded concurrent callers. Accepts items before the
    /// first `start` (they buffer until the worker begins consuming). With
    /// a bounded buffer the call awaits while the buffer is full
    /// (backpressure); an unbounded buffer never blocks.
    ///
    /// # Errors
    ///
    /// [`QueueError::Closed`] after `close` has been initiated and before
    /// any subsequent restart.
    pub async fn enqueue(&self, item: T) -> QueueResult<()> {
        // Clone the sender out so the inner lock is not held across the await
        let sender = { self.inner.lock().unwrap().sender.clone() };
        let sender = sender.ok_or(QueueError::Closed)?;
        sender.send(item).await.map_err(|_| QueueError::Closed)
    }

    /// Append a work item without awaiting
    ///
    /// # Errors
    ///
    /// [`QueueError::Full`] when a bounded buffer is at capacity,
    /// [`QueueError::Closed`] after close.
    pub fn try_enqueue(&self, item: T) -> QueueResult<()> {
        let sender = { self.inner.lock().unwrap().sender.clone() };
        let sender = sender.ok_or(QueueError::Closed)?;
        match sender.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendFailure::Full(_)) => Err(QueueError::Full {
                capacity: self.config.capacity.unwrap_or_default(),
            }),
            Err(TrySendFailure::Closed(_)) => Err(QueueError::Closed),
        }
    }

    /// Start processing: launch the worker tasks and wait for the latch to
    /// reach `Running`
    ///
    /// Idempotent: calling `start` while already starting or running is a
    /// no-op returning `Ok(())`. After a `close`, `start` opens a new cycle
    /// with a fresh buffer.
    ///
    /// # Errors
    ///
    /// [`QueueError::ShutdownInProgress`] when a concurrent close is still
    /// draining.
    pub async fn start(&self) -> QueueResult<()> {
        // Commit Stopped -> Starting. A failed attempt is re-checked in a
        // loop: a concurrent close can commit Stopped between the attempt
        // and the state read, and that window must restart the cycle, not
        // report a phantom success
        loop {
            if self.latch.starting() {
                break;
            }
            match self.latch.state() {
                LatchState::Stopping => return Err(QueueError::ShutdownInProgress),
                LatchState::Stopped => continue,
                // Already starting or running
                _ => return Ok(()),
            }
        }

        {
            let mut inner = self.inner.lock().unwrap();
            let receiver = match inner.receiver.take() {
                Some(receiver) => receiver,
                None => {
                    // Restart after close: fresh channel, new cycle
                    let (sender, receiver) = work_channel(self.config.capacity);
                    inner.sender = Some(sender);
                    receiver
                }
            };
            let shared: SharedReceiver<T> = Arc::new(tokio::sync::Mutex::new(receiver));
            let worker_count = self.config.workers.max(1);
            // The last worker to drain commits Stopped for this cycle
            let remaining = Arc::new(AtomicUsize::new(worker_count));

            log::debug!("Starting queue with {} worker(s)", worker_count);
            for worker_id in 0..worker_count {
                inner.workers.push(tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&shared),
                    Arc::clone(&self.action),
                    Arc::clone(&self.latch),
                    Arc::clone(&self.sink),
                    Arc::clone(&remaining),
                )));
            }
            // The lock is held through the spawns so a racing close cannot
            // observe Running with an empty worker list
        }

        self.latch.notify_started().wait().await;
        Ok(())
    }

    /// Stop processing: drain the buffered items, wait for every worker to
    /// exit, then mark the latch `Stopped`
    ///
    /// Two-phase shutdown: the producer side of the buffer is dropped
    /// first, so no new item is accepted from the moment of the call, then
    /// the workers keep pulling until the buffer is empty. Items buffered
    /// before the call are therefore processed, not discarded.
    ///
    /// Calling `close` when not running is a safe no-op; a closer arriving
    /// while another close is draining waits for the same `Stopped`
    /// transition instead of returning early.
    pub async fn close(&self) -> QueueResult<()> {
        // A close racing a start lets the cycle reach Running first
        if self.latch.state() == LatchState::Starting {
            self.latch.notify_started().wait().await;
        }

        if !self.latch.stopping() {
            if self.latch.state() == LatchState::Stopping {
                self.latch.notify_stopped().wait().await;
            }
            return Ok(());
        }

        let (sender, workers) = {
            let mut inner = self.inner.lock().unwrap();
            (inner.sender.take(), std::mem::take(&mut inner.workers))
        };
        // Phase one: stop accepting
        drop(sender);
        log::debug!("Queue stopping; draining {} worker(s)", workers.len());

        // Phase two: drain and exit
        for handle in workers {
            if let Err(e) = handle.await {
                // Worker bodies catch action panics; a join error is a
                // task-level fault such as runtime shutdown
                log::warn!("Worker task join failed: {:?}", e);
            }
        }

        // Normally the last exiting worker has already committed Stopped
        // (which keeps the drain reaching its terminal state even when this
        // future is dropped at a close_timeout deadline); committing here as
        // well covers a worker torn down by runtime shutdown
        self.latch.stopped();
        log::trace!("Queue stopped");
        Ok(())
    }

    /// `close` bounded by a deadline
    ///
    /// An action that never returns blocks a plain `close` indefinitely;
    /// this variant reports the expiry to the closer instead. After a
    /// timeout the buffer no longer accepts items and the stuck worker is
    /// not cancelled (an in-flight action always runs to completion); the
    /// drain continues in the background, and once the action returns the
    /// workers finish it and commit `Stopped`, so a retried `close` then
    /// completes normally.
    ///
    /// # Errors
    ///
    /// [`QueueError::CloseTimeout`] when the drain did not finish in time.
    pub async fn close_timeout(&self, timeout: Duration) -> QueueResult<()> {
        match tokio::time::timeout(timeout, self.close()).await {
            Ok(result) => result,
            Err(_) => Err(QueueError::CloseTimeout { timeout }),
        }
    }
}
