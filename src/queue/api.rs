//! Public API for the work queue
//!
//! This module provides the complete public API for the queue component.
//! External modules should import from here rather than directly from
//! internal modules. See the module documentation for usage examples and
//! the lifecycle contract.

// Core queue type and configuration
pub use crate::queue::config::{QueueConfig, DEFAULT_CAPACITY};
pub use crate::queue::internal::Queue;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult, WorkError};

// Observer hook for per-item failures
pub use crate::queue::sink::{ErrorSink, LogSink};

// Lifecycle state inspection
pub use crate::latch::api::{Latch, LatchState, Signal};
