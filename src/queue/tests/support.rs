//! Shared helpers for queue tests

use crate::queue::api::{ErrorSink, Queue, QueueConfig, WorkError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Shared record of processed items, in processing order
pub type Record = Arc<Mutex<Vec<String>>>;

/// Queue whose action appends each item to a shared record
pub fn recording_queue() -> (Queue<String>, Record) {
    recording_queue_with(QueueConfig::default())
}

/// Recording queue with an explicit configuration
pub fn recording_queue_with(config: QueueConfig) -> (Queue<String>, Record) {
    let record: Record = Arc::new(Mutex::new(Vec::new()));
    let action_record = Arc::clone(&record);
    let queue = Queue::with_config(
        move |item: String| {
            let record = Arc::clone(&action_record);
            async move {
                record.lock().unwrap().push(item);
                Ok::<(), WorkError>(())
            }
        },
        config,
    );
    (queue, record)
}

/// Error sink that records failure messages for assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ErrorSink for RecordingSink {
    async fn report(&self, err: WorkError) {
        self.messages.lock().unwrap().push(err.to_string());
    }
}

/// Poll `condition` until it holds or the deadline expires
pub async fn wait_until<F>(condition: F, deadline: Duration) -> bool
where
    F: Fn() -> bool,
{
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
