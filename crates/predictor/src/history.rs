//! Invocation history storage
//!
//! The history is owned by whoever constructs the estimator and is injected
//! as a [`HistoryStore`]. The in-memory store keeps records sorted by
//! timestamp and, under [`RetentionPolicy::Window`], prunes records that
//! have fallen out of the lookback window on every append.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use prewarm_config::{PrewarmConfig, RetentionPolicy};
use prewarm_core::{InvocationRecord, Result};

/// Extra age a record may reach past the window before it is pruned.
///
/// Pruning is measured from the newest record, so a concurrent caller whose
/// `now` lags behind it still sees every record inside its own window as
/// long as the lag stays under this grace period.
pub const PRUNE_GRACE_HOURS: f64 = 1.0 / 60.0;

/// Shared, append-only record of invocations
pub trait HistoryStore: Send + Sync {
    /// Append one record. Records with equal timestamps are all kept.
    fn append(&self, record: InvocationRecord) -> Result<()>;

    /// Consistent copy of the history at call time, oldest first
    fn snapshot(&self) -> Result<Vec<InvocationRecord>>;

    /// Number of records whose age at `now` is at most `window_hours`
    fn count_within(&self, now: DateTime<Utc>, window_hours: f64) -> Result<usize> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|record| record.age_hours(now) <= window_hours)
            .count())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }
}

/// Lock-guarded in-process history
#[derive(Debug)]
pub struct InMemoryHistory {
    records: RwLock<Vec<InvocationRecord>>,
    retention: RetentionPolicy,
    window_hours: f64,
}

impl InMemoryHistory {
    pub fn new(retention: RetentionPolicy, window_hours: f64) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            retention,
            window_hours,
        }
    }

    pub fn from_config(config: &PrewarmConfig) -> Self {
        Self::new(config.retention, config.window_size_hours)
    }

    /// Store that never drops records
    pub fn unbounded() -> Self {
        Self::new(RetentionPolicy::Unbounded, f64::INFINITY)
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    fn prune(&self, records: &mut Vec<InvocationRecord>) {
        let Some(latest) = records.last().map(|r| r.timestamp) else {
            return;
        };

        // Sorted by timestamp, so ages are non-increasing along the vector
        let horizon = self.window_hours + PRUNE_GRACE_HOURS;
        let expired = records.partition_point(|r| r.age_hours(latest) > horizon);
        if expired > 0 {
            records.drain(..expired);
            tracing::trace!(expired, remaining = records.len(), "pruned invocation history");
        }
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, record: InvocationRecord) -> Result<()> {
        let mut records = self.records.write();

        // Concurrent events may take the lock out of timestamp order
        match records.last() {
            Some(last) if last.timestamp > record.timestamp => {
                let position = records.partition_point(|r| r.timestamp <= record.timestamp);
                records.insert(position, record);
            }
            _ => records.push(record),
        }

        if self.retention == RetentionPolicy::Window {
            self.prune(&mut records);
        }

        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<InvocationRecord>> {
        Ok(self.records.read().clone())
    }

    fn count_within(&self, now: DateTime<Utc>, window_hours: f64) -> Result<usize> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|record| record.age_hours(now) <= window_hours)
            .count())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let history = InMemoryHistory::unbounded();
        let t = at(10, 0);
        history.append(InvocationRecord::new(t)).unwrap();
        history.append(InvocationRecord::new(t)).unwrap();
        assert_eq!(history.len().unwrap(), 2);
    }

    #[test]
    fn test_out_of_order_append_stays_sorted() {
        let history = InMemoryHistory::unbounded();
        for t in [at(10, 0), at(12, 0), at(11, 0), at(9, 30), at(12, 0)] {
            history.append(InvocationRecord::new(t)).unwrap();
        }

        let timestamps: Vec<_> = history
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(
            timestamps,
            vec![at(9, 30), at(10, 0), at(11, 0), at(12, 0), at(12, 0)]
        );
    }

    #[test]
    fn test_window_retention_prunes_on_append() {
        let history = InMemoryHistory::new(RetentionPolicy::Window, 2.0);
        history.append(InvocationRecord::new(at(8, 0))).unwrap();
        history.append(InvocationRecord::new(at(9, 0))).unwrap();
        history.append(InvocationRecord::new(at(10, 0))).unwrap();
        // Exactly at the window edge: kept
        assert_eq!(history.len().unwrap(), 3);

        history.append(InvocationRecord::new(at(10, 30))).unwrap();
        let remaining: Vec<_> = history
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(remaining, vec![at(9, 0), at(10, 0), at(10, 30)]);
    }

    #[test]
    fn test_lagging_reader_keeps_in_window_records() {
        let history = InMemoryHistory::new(RetentionPolicy::Window, 1.0);
        let t0 = at(6, 0);
        // A later invocation takes the lock before one that read the clock earlier
        for seconds in [0, 3_630, 3_540] {
            history
                .append(InvocationRecord::new(t0 + Duration::seconds(seconds)))
                .unwrap();
        }

        assert_eq!(history.len().unwrap(), 3);
        assert_eq!(history.count_within(t0 + Duration::seconds(3_540), 1.0).unwrap(), 3);

        // Beyond the grace period the oldest record goes
        history
            .append(InvocationRecord::new(t0 + Duration::minutes(62)))
            .unwrap();
        assert_eq!(history.len().unwrap(), 3);
    }

    #[test]
    fn test_unbounded_retention_keeps_everything() {
        let history = InMemoryHistory::new(RetentionPolicy::Unbounded, 1.0);
        let start = at(0, 0);
        for h in 0..48 {
            history
                .append(InvocationRecord::new(start + Duration::hours(h)))
                .unwrap();
        }
        assert_eq!(history.len().unwrap(), 48);
    }

    #[test]
    fn test_count_within_includes_future_records() {
        let history = InMemoryHistory::unbounded();
        history.append(InvocationRecord::new(at(10, 0))).unwrap();
        history.append(InvocationRecord::new(at(14, 0))).unwrap();
        // at(14, 0) is in the future relative to `now` and still counts
        assert_eq!(history.count_within(at(11, 0), 2.0).unwrap(), 2);
        assert_eq!(history.count_within(at(13, 0), 2.0).unwrap(), 1);
    }

    #[test]
    fn test_clear() {
        let history = InMemoryHistory::unbounded();
        history.append(InvocationRecord::new(at(1, 0))).unwrap();
        history.clear();
        assert_eq!(history.len().unwrap(), 0);
    }
}
