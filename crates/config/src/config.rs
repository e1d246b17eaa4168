//! Immutable runtime configuration for the decision unit

use prewarm_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default lookback window (24 hours)
pub const DEFAULT_WINDOW_SIZE_HOURS: f64 = 24.0;

/// Default confidence required to take the warm path
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Default simulated cold start delay (100ms)
pub const DEFAULT_COLD_START_DELAY_SECS: f64 = 0.1;

/// Default cost of reusing a warm context; only the benchmark sleeps on it
pub const DEFAULT_WARM_REUSE_DELAY_SECS: f64 = 0.0;

/// Confidence reported when frequency reaches the cut-off
pub const DEFAULT_HIGH_CONFIDENCE: f64 = 0.8;

/// Confidence reported below the cut-off
pub const DEFAULT_LOW_CONFIDENCE: f64 = 0.4;

/// Frequency at which the predictor switches to high confidence
pub const DEFAULT_FREQUENCY_CUTOFF: f64 = 0.5;

/// What happens to records once they fall out of the lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// Drop records older than the window whenever a new one is appended.
    ///
    /// Age is measured from the newest stored record plus a one minute
    /// grace period, so invocations racing each other out of timestamp
    /// order do not lose records still inside their own window.
    #[default]
    Window,
    /// Keep every record for the lifetime of the process
    Unbounded,
}

impl FromStr for RetentionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" => Ok(RetentionPolicy::Window),
            "unbounded" | "none" => Ok(RetentionPolicy::Unbounded),
            other => Err(Error::configuration(format!(
                "unknown retention policy '{other}' (expected 'window' or 'unbounded')"
            ))),
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::Window => write!(f, "window"),
            RetentionPolicy::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Process-wide configuration, immutable after construction.
///
/// Shared across async tasks behind an `Arc`; every component receives it at
/// construction instead of reading ambient constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrewarmConfig {
    /// Lookback window for the frequency estimate, in hours
    pub window_size_hours: f64,
    /// Minimum confidence for the warm path (0.0 to 1.0)
    pub confidence_threshold: f64,
    /// Simulated initialisation delay on the cold path, in seconds
    pub cold_start_delay_secs: f64,
    /// Simulated cost of reusing a warm context, in seconds
    pub warm_reuse_delay_secs: f64,
    /// Confidence emitted when frequency >= `frequency_cutoff`
    pub high_confidence: f64,
    /// Confidence emitted when frequency < `frequency_cutoff`
    pub low_confidence: f64,
    /// Frequency boundary between the two confidence levels
    pub frequency_cutoff: f64,
    /// History retention
    pub retention: RetentionPolicy,
}

impl Default for PrewarmConfig {
    fn default() -> Self {
        Self {
            window_size_hours: DEFAULT_WINDOW_SIZE_HOURS,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            cold_start_delay_secs: DEFAULT_COLD_START_DELAY_SECS,
            warm_reuse_delay_secs: DEFAULT_WARM_REUSE_DELAY_SECS,
            high_confidence: DEFAULT_HIGH_CONFIDENCE,
            low_confidence: DEFAULT_LOW_CONFIDENCE,
            frequency_cutoff: DEFAULT_FREQUENCY_CUTOFF,
            retention: RetentionPolicy::Window,
        }
    }
}

impl PrewarmConfig {
    /// Start a builder seeded with the defaults
    pub fn builder() -> PrewarmConfigBuilder {
        PrewarmConfigBuilder::new()
    }

    /// Saturates instead of panicking when the value was never validated
    pub fn cold_start_delay(&self) -> Duration {
        secs_to_duration(self.cold_start_delay_secs)
    }

    pub fn warm_reuse_delay(&self) -> Duration {
        secs_to_duration(self.warm_reuse_delay_secs)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !(self.window_size_hours.is_finite() && self.window_size_hours > 0.0) {
            return Err(Error::configuration(format!(
                "window_size_hours must be a positive number, got {}",
                self.window_size_hours
            )));
        }

        for (name, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("high_confidence", self.high_confidence),
            ("low_confidence", self.low_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::configuration(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        for (name, value) in [
            ("cold_start_delay_secs", self.cold_start_delay_secs),
            ("warm_reuse_delay_secs", self.warm_reuse_delay_secs),
            ("frequency_cutoff", self.frequency_cutoff),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::configuration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("cold_start_delay_secs", self.cold_start_delay_secs),
            ("warm_reuse_delay_secs", self.warm_reuse_delay_secs),
        ] {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(Error::configuration(format!(
                    "{name} is too large to represent as a duration, got {value}"
                )));
            }
        }

        Ok(())
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// Builder for creating validated configurations
pub struct PrewarmConfigBuilder {
    config: PrewarmConfig,
}

impl PrewarmConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PrewarmConfig::default(),
        }
    }

    pub fn with_window_size_hours(mut self, hours: f64) -> Self {
        self.config.window_size_hours = hours;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    pub fn with_cold_start_delay(mut self, delay: Duration) -> Self {
        self.config.cold_start_delay_secs = delay.as_secs_f64();
        self
    }

    pub fn with_warm_reuse_delay(mut self, delay: Duration) -> Self {
        self.config.warm_reuse_delay_secs = delay.as_secs_f64();
        self
    }

    /// Set the two confidence levels emitted by the predictor
    pub fn with_confidence_levels(mut self, high: f64, low: f64) -> Self {
        self.config.high_confidence = high;
        self.config.low_confidence = low;
        self
    }

    pub fn with_frequency_cutoff(mut self, cutoff: f64) -> Self {
        self.config.frequency_cutoff = cutoff;
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.config.retention = retention;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<PrewarmConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PrewarmConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
