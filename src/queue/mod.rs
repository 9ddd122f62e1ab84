//! Lifecycle-Controlled Work Queue Component
//!
//! A reusable producer/consumer work queue with an explicit start/stop
//! lifecycle, drain-on-close shutdown and per-item failure isolation.
//!
//! # Overview
//!
//! This module decouples any number of concurrent producers from one or
//! more worker tasks that invoke a user-supplied action. Key properties:
//!
//! - **Multiple Producers**: any number of tasks can enqueue concurrently
//! - **Ordered Processing**: arrival-order FIFO, non-overlapping with the
//!   default single worker
//! - **Observable Lifecycle**: a [`Latch`](crate::latch::Latch) tracks
//!   stopped/starting/running/stopping and hands out one-shot wait handles
//! - **Graceful Shutdown**: `close` stops intake first, then drains what
//!   was already buffered before letting the workers exit
//! - **Failure Isolation**: action errors and panics are routed to an
//!   [`ErrorSink`] and never kill the worker loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ enqueue            │ enqueue            │ enqueue
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Queue<T>                         │
//! │   ┌───┬───┬───┬───┬───┬───┬───┬───┐    ┌───────────┐   │
//! │   │ 1 │ 2 │ 3 │ 4 │ 5 │ 6 │ 7 │...│    │   Latch   │   │
//! │   └───┴───┴───┴───┴───┴───┴───┴───┘    └───────────┘   │
//! │        │ pull (FIFO)                                    │
//! │        ▼                                                │
//! │   ┌──────────┐  action(item)   ┌─────────────────┐     │
//! │   │  Worker  │ ───────────────▶│ user action     │     │
//! │   └──────────┘   err/panic ──▶ │ ErrorSink       │     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never execute the action themselves; all processing happens on
//! the worker task(s). Items enqueued before the first `start` buffer until
//! the worker begins consuming.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use workqueue::queue::{Queue, WorkError};
//!
//! # async fn example() -> Result<(), workqueue::queue::QueueError> {
//! let queue = Queue::new(|item: String| async move {
//!     log::info!("processing {}", item);
//!     Ok::<(), WorkError>(())
//! });
//!
//! queue.start().await?;
//! assert!(queue.latch().is_running());
//!
//! queue.enqueue("first".to_string()).await?;
//! queue.enqueue("second".to_string()).await?;
//!
//! // Drains "first" and "second" before returning
//! queue.close().await?;
//! assert!(!queue.latch().is_running());
//! # Ok(())
//! # }
//! ```

mod channel;
mod config;
mod error;
mod internal;
mod sink;
mod worker;

pub mod api;

pub use config::{QueueConfig, DEFAULT_CAPACITY};
pub use error::{QueueError, QueueResult, WorkError};
pub use internal::Queue;
pub use sink::{ErrorSink, LogSink};

#[cfg(test)]
mod tests;
