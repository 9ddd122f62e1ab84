//! Lifecycle Latch Component
//!
//! A concurrency-safe state machine tracking whether an owning component is
//! stopped, starting, running, or stopping, with one-shot wait handles for
//! observing transition completion.
//!
//! # Overview
//!
//! The latch is the single source of truth for running/stopped status. It is
//! created once with its owning component and reused across start/stop
//! cycles:
//!
//! ```text
//! Stopped ──▶ Starting ──▶ Running ──▶ Stopping ──▶ Stopped ──▶ ...
//! ```
//!
//! Transitions are monotonic within a cycle; no transition is skipped.
//! Every operation is safe for concurrent invocation from any number of
//! tasks, and `is_running()` is a lock-free read that is always consistent
//! with the last committed transition.
//!
//! # Wait Handles
//!
//! `notify_started()` and `notify_stopped()` return a [`Signal`], a one-shot
//! handle that resolves when the corresponding transition next completes.
//! A handle requested while the target state already holds resolves
//! immediately; a pending handle never resolves on a transition from a
//! previous cycle.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use workqueue::latch::Latch;
//!
//! # async fn example() {
//! let latch = Latch::new();
//!
//! let started = latch.notify_started();
//! latch.starting();
//! latch.started();
//! started.wait().await;
//!
//! assert!(latch.is_running());
//! # }
//! ```

mod internal;
mod signal;

pub mod api;

pub use internal::{Latch, LatchState};
pub use signal::Signal;
