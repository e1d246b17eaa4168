//! Concurrent invocations against one shared history

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use prewarm_config::{PrewarmConfig, RetentionPolicy};
use prewarm_core::InvocationRecord;
use prewarm_predictor::{HistoryStore, InMemoryHistory, InvocationHandler};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn concurrent_appends_are_not_lost() {
    let history = Arc::new(InMemoryHistory::unbounded());
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let threads = 8;
    let per_thread = 500;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let history = Arc::clone(&history);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    // Interleaved timestamps so appends arrive out of order
                    let offset = (i * threads + t) as i64;
                    history
                        .append(InvocationRecord::new(base + ChronoDuration::seconds(offset)))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let records = history.snapshot().unwrap();
    assert_eq!(records.len(), threads * per_thread);
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn snapshot_is_consistent_during_writes() {
    let history = Arc::new(InMemoryHistory::new(RetentionPolicy::Unbounded, 24.0));
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

    let writer = {
        let history = Arc::clone(&history);
        thread::spawn(move || {
            for i in 0..2_000 {
                history
                    .append(InvocationRecord::new(base + ChronoDuration::milliseconds(i)))
                    .unwrap();
            }
        })
    };

    let mut last_len = 0;
    while !writer.is_finished() {
        let snapshot = history.snapshot().unwrap();
        assert!(snapshot.len() >= last_len);
        assert!(snapshot.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        last_len = snapshot.len();
    }
    writer.join().unwrap();
    assert_eq!(history.len().unwrap(), 2_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_handlers_share_history() {
    let config = PrewarmConfig::builder()
        .with_cold_start_delay(Duration::from_millis(5))
        .build()
        .unwrap();
    let handler = Arc::new(InvocationHandler::new(Arc::new(config)));

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.handle(&serde_json::json!({ "n": i })).await })
        })
        .collect();

    let responses = futures::future::join_all(tasks).await;
    for response in responses {
        assert_eq!(response.unwrap().status_code, 200);
    }

    assert_eq!(handler.estimator().history().len().unwrap(), 64);
    let stats = handler.statistics();
    assert_eq!(stats.warm_starts + stats.cold_starts, 64);
    assert_eq!(stats.failures, 0);
}
