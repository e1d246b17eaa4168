//! Recent-rate signal over the invocation history

use crate::history::{HistoryStore, InMemoryHistory};
use chrono::{DateTime, Utc};
use prewarm_config::PrewarmConfig;
use prewarm_core::{InvocationRecord, Result};
use std::sync::Arc;

/// Records invocations and turns them into a frequency estimate.
///
/// The estimate is `count / window_size_hours` where `count` is the number of
/// records at most `window_size_hours` old at `now`. It is a per-hour rate,
/// not a probability, and exceeds 1 once more than one invocation per hour
/// lands in the window.
pub struct FrequencyEstimator {
    history: Arc<dyn HistoryStore>,
    config: Arc<PrewarmConfig>,
}

impl FrequencyEstimator {
    pub fn new(history: Arc<dyn HistoryStore>, config: Arc<PrewarmConfig>) -> Self {
        Self { history, config }
    }

    /// Estimator over a fresh in-memory history honouring the configured retention
    pub fn in_memory(config: Arc<PrewarmConfig>) -> Self {
        let history = Arc::new(InMemoryHistory::from_config(&config));
        Self::new(history, config)
    }

    pub fn record_invocation(&self, now: DateTime<Utc>) -> Result<()> {
        self.history.append(InvocationRecord::new(now))
    }

    pub fn estimate_frequency(&self, now: DateTime<Utc>) -> Result<f64> {
        let window = self.config.window_size_hours;
        let recent = self.history.count_within(now, window)?;
        let frequency = recent as f64 / window;

        if frequency > 1.0 {
            tracing::debug!(
                frequency,
                recent,
                window_hours = window,
                "frequency estimate exceeds 1; value is a per-hour rate, not a probability"
            );
        }

        Ok(frequency)
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use prewarm_config::RetentionPolicy;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn estimator(retention: RetentionPolicy) -> FrequencyEstimator {
        let config = PrewarmConfig::builder()
            .with_retention(retention)
            .build()
            .unwrap();
        FrequencyEstimator::in_memory(Arc::new(config))
    }

    #[test]
    fn test_empty_history_is_zero() {
        let estimator = estimator(RetentionPolicy::Window);
        assert_eq!(estimator.estimate_frequency(now()).unwrap(), 0.0);
    }

    #[test]
    fn test_counts_records_inside_window() {
        let estimator = estimator(RetentionPolicy::Unbounded);
        // 3 inside, one exactly on the edge, 2 outside
        for hours in [1, 5, 23, 24, 25, 72] {
            estimator
                .record_invocation(now() - Duration::hours(hours))
                .unwrap();
        }
        assert_eq!(estimator.estimate_frequency(now()).unwrap(), 4.0 / 24.0);
    }

    #[test]
    fn test_frequency_may_exceed_one() {
        let estimator = estimator(RetentionPolicy::Window);
        for minute in 0..30 {
            estimator
                .record_invocation(now() - Duration::minutes(minute * 2))
                .unwrap();
        }
        assert_eq!(estimator.estimate_frequency(now()).unwrap(), 1.25);
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let estimator = estimator(RetentionPolicy::Window);
        estimator.record_invocation(now()).unwrap();
        let first = estimator.estimate_frequency(now()).unwrap();
        let second = estimator.estimate_frequency(now()).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_retention_does_not_change_estimate() {
        let pruned = estimator(RetentionPolicy::Window);
        let kept = estimator(RetentionPolicy::Unbounded);

        let start = now() - Duration::hours(60);
        for step in 0..40 {
            let t = start + Duration::minutes(step * 90);
            pruned.record_invocation(t).unwrap();
            kept.record_invocation(t).unwrap();

            assert_eq!(
                pruned.estimate_frequency(t).unwrap().to_bits(),
                kept.estimate_frequency(t).unwrap().to_bits()
            );
        }
        assert!(pruned.history().len().unwrap() < kept.history().len().unwrap());
    }
}
