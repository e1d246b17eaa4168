//! Invocation outcome counters

use prewarm_core::Decision;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters updated by the handler on every invocation
#[derive(Debug, Default)]
pub struct HandlerStatistics {
    warm_starts: AtomicU64,
    cold_starts: AtomicU64,
    failures: AtomicU64,
}

impl HandlerStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decision(&self, decision: Decision) {
        match decision {
            Decision::Warm => self.warm_starts.fetch_add(1, Ordering::Relaxed),
            Decision::Cold => self.cold_starts.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            warm_starts: self.warm_starts.load(Ordering::Relaxed),
            cold_starts: self.cold_starts.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`HandlerStatistics`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub warm_starts: u64,
    pub cold_starts: u64,
    pub failures: u64,
}

impl StatisticsSnapshot {
    pub fn total(&self) -> u64 {
        self.warm_starts + self.cold_starts + self.failures
    }

    /// Share of successful invocations that reused a warm context, as a percentage
    pub fn warm_rate(&self) -> f64 {
        let served = self.warm_starts + self.cold_starts;
        if served == 0 {
            0.0
        } else {
            (self.warm_starts as f64 / served as f64) * 100.0
        }
    }
}
