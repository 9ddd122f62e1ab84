//! Queue configuration
//!
//! Bounded-buffer capacity and worker fan-out are configurable extensions
//! on top of the single-worker, bounded default.

/// Default bounded capacity of the pending-work buffer
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for a [`Queue`](crate::queue::Queue)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Bounded buffer capacity; `None` selects an unbounded buffer that
    /// never blocks producers but trades memory for latency
    pub capacity: Option<usize>,
    /// Number of worker tasks pulling from the buffer
    ///
    /// With more than one worker, items are still dispatched in arrival
    /// order but global FIFO completion no longer holds; ordering is
    /// FIFO-per-worker only.
    pub workers: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_CAPACITY),
            workers: 1,
        }
    }
}

impl QueueConfig {
    /// Configuration with a bounded buffer of the given capacity
    ///
    /// Producers block (await) when the buffer is full.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Default::default()
        }
    }

    /// Configuration with an unbounded buffer
    pub fn unbounded() -> Self {
        Self {
            capacity: None,
            ..Default::default()
        }
    }

    /// Set the number of worker tasks (minimum one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
