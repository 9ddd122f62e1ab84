//! Internal Latch state machine implementation
//!
//! State and waiter lists live behind a single mutex so a transition and the
//! wake-up of its waiters commit together. An atomic mirror of the running
//! flag serves the lock-free `is_running` fast path.

use crate::latch::signal::Signal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Lifecycle states tracked by the latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Not running; the initial state and the terminal state of each cycle
    Stopped,
    /// A start was requested; the worker is not yet consuming
    Starting,
    /// The worker is actively consuming
    Running,
    /// A stop was requested; the worker is draining
    Stopping,
}

#[derive(Debug)]
struct LatchInner {
    state: LatchState,
    started_waiters: Vec<oneshot::Sender<()>>,
    stopped_waiters: Vec<oneshot::Sender<()>>,
}

/// Concurrency-safe lifecycle state machine
///
/// Transition methods return `true` when the transition committed and
/// `false` when it was a no-op because the latch was not in the expected
/// predecessor state. Redundant calls are therefore safe from any task; the
/// first caller wins and the rest observe `false`.
#[derive(Debug)]
pub struct Latch {
    inner: Mutex<LatchInner>,
    running: AtomicBool,
}

impl Default for Latch {
    fn default() -> Self {
        Self::new()
    }
}

impl Latch {
    /// Create a new latch in the `Stopped` state
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LatchInner {
                state: LatchState::Stopped,
                started_waiters: Vec::new(),
                stopped_waiters: Vec::new(),
            }),
            running: AtomicBool::new(false),
        }
    }

    /// Get a snapshot of the current state
    pub fn state(&self) -> LatchState {
        self.inner.lock().unwrap().state
    }

    /// Check whether the current state is `Running` without locking
    pub fn is_running(&self) -> bool {
        // Acquire pairs with the Release store in started()/stopping() so a
        // reader always sees the last committed transition
        self.running.load(Ordering::Acquire)
    }

    /// Record the transition to `Starting`
    ///
    /// Commits only from `Stopped`; returns `false` (no-op) when the latch
    /// is already starting, running, or stopping.
    pub fn starting(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != LatchState::Stopped {
            return false;
        }
        inner.state = LatchState::Starting;
        true
    }

    /// Record the transition to `Running`
    ///
    /// Called by the worker once it is actively consuming. Wakes every
    /// waiter from `notify_started` exactly once per cycle.
    pub fn started(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != LatchState::Starting {
            return false;
        }
        inner.state = LatchState::Running;
        self.running.store(true, Ordering::Release);
        for waiter in inner.started_waiters.drain(..) {
            let _ = waiter.send(());
        }
        true
    }

    /// Record the transition to `Stopping`
    ///
    /// Commits only from `Running`; safe to call when never running, in
    /// which case it is a no-op returning `false`.
    pub fn stopping(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != LatchState::Running {
            return false;
        }
        inner.state = LatchState::Stopping;
        self.running.store(false, Ordering::Release);
        true
    }

    /// Record the transition to `Stopped`
    ///
    /// Wakes every waiter from `notify_stopped` exactly once per cycle.
    pub fn stopped(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != LatchState::Stopping {
            return false;
        }
        inner.state = LatchState::Stopped;
        for waiter in inner.stopped_waiters.drain(..) {
            let _ = waiter.send(());
        }
        true
    }

    /// Get a one-shot handle resolving when the latch next reaches `Running`
    ///
    /// If the latch is already running the handle is returned pre-resolved.
    pub fn notify_started(&self) -> Signal {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == LatchState::Running {
            return Signal::ready();
        }
        let (tx, signal) = Signal::pending();
        inner.started_waiters.push(tx);
        signal
    }

    /// Get a one-shot handle resolving when the latch next reaches `Stopped`
    ///
    /// If the latch is already stopped the handle is returned pre-resolved.
    pub fn notify_stopped(&self) -> Signal {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == LatchState::Stopped {
            return Signal::ready();
        }
        let (tx, signal) = Signal::pending();
        inner.stopped_waiters.push(tx);
        signal
    }
}
