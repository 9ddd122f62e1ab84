//! Pending-work buffer backed by a tokio mpsc channel
//!
//! Wraps the bounded and unbounded channel flavours behind one interface so
//! the queue core does not branch on the configured capacity.

use tokio::sync::mpsc;

/// Producer side of the pending-work buffer
pub(crate) enum WorkSender<T> {
    Bounded(mpsc::Sender<T>),
    Unbounded(mpsc::UnboundedSender<T>),
}

impl<T> Clone for WorkSender<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Bounded(tx) => Self::Bounded(tx.clone()),
            Self::Unbounded(tx) => Self::Unbounded(tx.clone()),
        }
    }
}

/// Why a non-blocking send did not take the item
pub(crate) enum TrySendFailure<T> {
    Full(T),
    Closed(T),
}

impl<T> WorkSender<T> {
    /// Append an item, awaiting when a bounded buffer is full
    ///
    /// Returns the item back when the receiving side is gone.
    pub(crate) async fn send(&self, item: T) -> Result<(), T> {
        match self {
            Self::Bounded(tx) => tx.send(item).await.map_err(|e| e.0),
            Self::Unbounded(tx) => tx.send(item).map_err(|e| e.0),
        }
    }

    /// Append an item without awaiting
    pub(crate) fn try_send(&self, item: T) -> Result<(), TrySendFailure<T>> {
        match self {
            Self::Bounded(tx) => tx.try_send(item).map_err(|e| match e {
                mpsc::error::TrySendError::Full(item) => TrySendFailure::Full(item),
                mpsc::error::TrySendError::Closed(item) => TrySendFailure::Closed(item),
            }),
            Self::Unbounded(tx) => tx.send(item).map_err(|e| TrySendFailure::Closed(e.0)),
        }
    }
}

/// Consumer side of the pending-work buffer
pub(crate) enum WorkReceiver<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

impl<T> WorkReceiver<T> {
    /// Pull the next item, awaiting while the buffer is empty
    ///
    /// Returns `None` once every sender is gone and the buffer is drained,
    /// which is the worker's shutdown signal.
    pub(crate) async fn recv(&mut self) -> Option<T> {
        match self {
            Self::Bounded(rx) => rx.recv().await,
            Self::Unbounded(rx) => rx.recv().await,
        }
    }
}

/// Create the channel pair for the given capacity configuration
pub(crate) fn work_channel<T>(capacity: Option<usize>) -> (WorkSender<T>, WorkReceiver<T>) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity);
            (WorkSender::Bounded(tx), WorkReceiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (WorkSender::Unbounded(tx), WorkReceiver::Unbounded(rx))
        }
    }
}
