//! One-shot wait handles for latch transitions

use tokio::sync::oneshot;

/// One-shot handle that resolves when a latch transition completes
///
/// A `Signal` is obtained from [`Latch::notify_started`] or
/// [`Latch::notify_stopped`] and resolves at most once. Handles requested
/// after the transition already happened are returned pre-resolved, so a
/// late waiter never blocks forever.
///
/// [`Latch::notify_started`]: crate::latch::Latch::notify_started
/// [`Latch::notify_stopped`]: crate::latch::Latch::notify_stopped
#[derive(Debug)]
pub struct Signal {
    rx: oneshot::Receiver<()>,
}

impl Signal {
    /// Create a signal that is already resolved
    pub(crate) fn ready() -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(());
        Self { rx }
    }

    /// Create a pending signal together with its resolution side
    pub(crate) fn pending() -> (oneshot::Sender<()>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Wait for the transition to complete
    ///
    /// Also returns if the latch is dropped while the signal is pending;
    /// with the owner gone there is no transition left to wait for.
    pub async fn wait(self) {
        let _ = self.rx.await;
    }
}
