//! Queue Error Types

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is closed")]
    Closed,

    #[error("Queue is full (capacity: {capacity})")]
    Full { capacity: usize },

    #[error("Queue shutdown in progress")]
    ShutdownInProgress,

    #[error("Close timed out after {timeout:?}")]
    CloseTimeout { timeout: Duration },

    #[error("Action panicked: {message}")]
    ActionPanic { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error type returned by work-item actions
///
/// Boxed so any user error type flows through the observer hook unchanged.
pub type WorkError = Box<dyn std::error::Error + Send + Sync + 'static>;
