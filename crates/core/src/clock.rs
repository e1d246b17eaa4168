//! Time source abstraction.
//!
//! The handler never calls `Utc::now()` directly; it asks a [`Clock`], which
//! lets tests drive time explicitly and lets a broken time source surface as
//! [`Error::ClockUnavailable`] instead of a panic.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" for invocation timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>>;
}

/// Wall clock backed by [`SystemTime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::clock_unavailable(format!("system time before unix epoch: {e}")))?;

        let secs = i64::try_from(since_epoch.as_secs())
            .map_err(|_| Error::clock_unavailable("system time out of range"))?;

        DateTime::<Utc>::from_timestamp(secs, since_epoch.subsec_nanos())
            .ok_or_else(|| Error::clock_unavailable("system time out of range"))
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        Ok(*self.now.lock())
    }
}
