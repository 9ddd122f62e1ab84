//! Error sink for per-item failures
//!
//! An action returning an error (or panicking) never stops the worker loop;
//! the failure is routed to an observer hook chosen by the queue's owner so
//! it can feed application logging or metrics.

use crate::queue::error::WorkError;
use async_trait::async_trait;

/// Observer hook for action failures
///
/// Implementations receive every error returned by the action and every
/// panic caught at the per-item boundary. Reporting must not fail; a sink
/// that cannot deliver should degrade internally (e.g. log and drop).
#[async_trait]
pub trait ErrorSink: Send + Sync {
    /// Handle a single per-item failure
    async fn report(&self, err: WorkError);
}

/// Default sink that routes failures to the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ErrorSink for LogSink {
    async fn report(&self, err: WorkError) {
        log::error!("Work item failed: {}", err);
    }
}
