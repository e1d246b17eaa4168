//! Frequency → confidence → decision

use crate::cold_start::{ColdStart, SimulatedColdStart};
use prewarm_config::PrewarmConfig;
use prewarm_core::{Decision, PredictionResult, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Turns a frequency estimate into a warm/cold decision.
///
/// Two stages on purpose: `predict` maps frequency onto one of two confidence
/// levels, `decide` compares confidence with the configured threshold. With
/// the default levels (0.8 / 0.4) and threshold (0.6) this is the same as
/// `frequency >= 0.5`, but confidence is reported on its own and the two
/// thresholds can be configured independently.
pub struct WarmStartPredictor {
    config: Arc<PrewarmConfig>,
    cold_start: Arc<dyn ColdStart>,
}

impl WarmStartPredictor {
    pub fn new(config: Arc<PrewarmConfig>, cold_start: Arc<dyn ColdStart>) -> Self {
        Self { config, cold_start }
    }

    /// Predictor whose cold start sleeps for the configured delay
    pub fn simulated(config: Arc<PrewarmConfig>) -> Self {
        let cold_start = Arc::new(SimulatedColdStart::new(config.cold_start_delay()));
        Self::new(config, cold_start)
    }

    pub fn predict(&self, frequency: f64) -> f64 {
        if frequency >= self.config.frequency_cutoff {
            self.config.high_confidence
        } else {
            self.config.low_confidence
        }
    }

    pub fn decide(&self, confidence: f64) -> Decision {
        if confidence >= self.config.confidence_threshold {
            Decision::Warm
        } else {
            Decision::Cold
        }
    }

    /// Run both stages and keep every intermediate value
    pub fn evaluate(&self, frequency: f64) -> PredictionResult {
        let confidence = self.predict(frequency);
        PredictionResult {
            frequency,
            confidence,
            decision: self.decide(confidence),
        }
    }

    /// Wait out the cold start delay; never cancelled
    pub async fn cold_start(&self) -> Result<()> {
        self.cold_start.provision(&CancellationToken::new()).await
    }

    /// Wait out the cold start delay unless `cancel` fires first
    pub async fn cold_start_with(&self, cancel: &CancellationToken) -> Result<()> {
        self.cold_start.provision(cancel).await
    }
}
