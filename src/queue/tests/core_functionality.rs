//! Tests for ordered processing and per-item failure isolation

#[cfg(test)]
mod tests {
    use crate::queue::api::{Queue, WorkError};
    use crate::queue::tests::support::{recording_queue, wait_until, RecordingSink};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test]
    async fn test_items_processed_in_enqueue_order() {
        let (queue, record) = recording_queue();

        queue.start().await.unwrap();
        assert!(queue.latch().is_running());

        queue.enqueue("a".to_string()).await.unwrap();
        queue.enqueue("b".to_string()).await.unwrap();

        assert!(
            wait_until(|| record.lock().unwrap().len() == 2, Duration::from_secs(2)).await,
            "both items should be processed"
        );

        queue.close().await.unwrap();
        assert!(!queue.latch().is_running());
        assert_eq!(*record.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_enqueue_before_start_buffers_items() {
        let (queue, record) = recording_queue();

        // Items enqueued before the first start buffer for the worker
        for i in 0..10 {
            queue.enqueue(format!("item-{}", i)).await.unwrap();
        }
        assert!(!queue.latch().is_running());
        assert!(record.lock().unwrap().is_empty());

        queue.start().await.unwrap();
        assert!(
            wait_until(|| record.lock().unwrap().len() == 10, Duration::from_secs(2)).await,
            "all buffered items should be processed after start"
        );
        queue.close().await.unwrap();

        let processed = record.lock().unwrap().clone();
        let expected: Vec<String> = (0..10).map(|i| format!("item-{}", i)).collect();
        assert_eq!(processed, expected, "arrival order should be preserved");
    }

    #[tokio::test]
    async fn test_action_error_does_not_stop_worker() {
        let record: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let action_record = Arc::clone(&record);
        let sink = Arc::new(RecordingSink::default());

        let queue = Queue::new(move |item: String| {
            let record = Arc::clone(&action_record);
            async move {
                if item == "boom" {
                    return Err::<(), WorkError>("delivery failed".into());
                }
                record.lock().unwrap().push(item);
                Ok(())
            }
        })
        .with_error_sink(sink.clone());

        queue.start().await.unwrap();
        queue.enqueue("a".to_string()).await.unwrap();
        queue.enqueue("boom".to_string()).await.unwrap();
        queue.enqueue("b".to_string()).await.unwrap();

        assert!(
            wait_until(|| record.lock().unwrap().len() == 2, Duration::from_secs(2)).await,
            "the item after the failure should still be processed"
        );
        queue.close().await.unwrap();

        assert_eq!(*record.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
        let failures = sink.messages();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("delivery failed"));
    }

    #[tokio::test]
    async fn test_action_panic_is_caught_at_item_boundary() {
        let record: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let action_record = Arc::clone(&record);
        let sink = Arc::new(RecordingSink::default());

        let queue = Queue::new(move |item: String| {
            let record = Arc::clone(&action_record);
            async move {
                if item == "panic" {
                    panic!("bad item");
                }
                record.lock().unwrap().push(item);
                Ok::<(), WorkError>(())
            }
        })
        .with_error_sink(sink.clone());

        queue.start().await.unwrap();
        queue.enqueue("a".to_string()).await.unwrap();
        queue.enqueue("panic".to_string()).await.unwrap();
        queue.enqueue("b".to_string()).await.unwrap();

        assert!(
            wait_until(|| record.lock().unwrap().len() == 2, Duration::from_secs(2)).await,
            "one bad item must not kill the worker loop"
        );
        queue.close().await.unwrap();

        assert_eq!(*record.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
        let failures = sink.messages();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("Action panicked"));
        assert!(failures[0].contains("bad item"));
    }

    #[tokio::test]
    async fn test_panic_before_first_await_is_caught() {
        let record: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let action_record = Arc::clone(&record);
        let sink = Arc::new(RecordingSink::default());

        // The panic fires while the action builds its future, before any
        // await point
        let queue = Queue::new(move |item: String| {
            if item == "boom" {
                panic!("rejected before dispatch");
            }
            let record = Arc::clone(&action_record);
            async move {
                record.lock().unwrap().push(item);
                Ok::<(), WorkError>(())
            }
        })
        .with_error_sink(sink.clone());

        queue.start().await.unwrap();
        queue.enqueue("a".to_string()).await.unwrap();
        queue.enqueue("boom".to_string()).await.unwrap();
        queue.enqueue("b".to_string()).await.unwrap();

        assert!(
            wait_until(|| record.lock().unwrap().len() == 2, Duration::from_secs(2)).await,
            "a panic while building the future must not kill the worker loop"
        );
        queue.close().await.unwrap();

        assert_eq!(*record.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
        let failures = sink.messages();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("Action panicked"));
        assert!(failures[0].contains("rejected before dispatch"));
    }

    #[tokio::test]
    async fn test_latch_wait_handles_follow_queue_lifecycle() {
        let (queue, _record) = recording_queue();
        let latch = queue.latch();

        let started = latch.notify_started();
        queue.start().await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), started.wait())
            .await
            .expect("started handle should resolve once the worker consumes");

        let stopped = latch.notify_stopped();
        queue.close().await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), stopped.wait())
            .await
            .expect("stopped handle should resolve once the drain completes");
    }
}
