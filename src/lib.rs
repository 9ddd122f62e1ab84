//! workqueue - lifecycle-controlled asynchronous work queue
//!
//! An in-process primitive that accepts work items from any number of
//! concurrent producers and processes them through a user-supplied action
//! on dedicated worker task(s), with an observable start/stop lifecycle and
//! drain-on-close shutdown.
//!
//! Two components compose the crate:
//!
//! - [`latch`] — the lifecycle state machine
//!   (`Stopped → Starting → Running → Stopping → Stopped`) with one-shot
//!   wait handles for transition completion
//! - [`queue`] — the producer/worker bridge built on top of a latch
//!
//! The queue carries no wire protocol, file format or CLI surface; it is a
//! library primitive consumed by higher-level orchestration such as a job
//! dispatcher using it as its background delivery mechanism.

pub mod latch;
pub mod queue;
