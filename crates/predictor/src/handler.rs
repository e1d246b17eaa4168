//! Invocation entry point
//!
//! Per event: timestamp → record → estimate → predict → decide → optionally
//! wait out the cold start → respond. Collaborator failures are logged and
//! turned into a generic failure response; the handler never panics or
//! returns an error to the platform.

use crate::cold_start::{ColdStart, SimulatedColdStart};
use crate::estimator::FrequencyEstimator;
use crate::history::{HistoryStore, InMemoryHistory};
use crate::predictor::WarmStartPredictor;
use crate::stats::{HandlerStatistics, StatisticsSnapshot};
use prewarm_config::PrewarmConfig;
use prewarm_core::{
    Clock, Decision, InvocationResponse, PredictionResult, Result, ResultExt, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Everything known about one handled invocation
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    pub response: InvocationResponse,
    /// `None` when the invocation failed before a decision was made
    pub prediction: Option<PredictionResult>,
    pub latency: Duration,
}

/// Shared decision unit called once per invocation event
pub struct InvocationHandler {
    clock: Arc<dyn Clock>,
    estimator: FrequencyEstimator,
    predictor: WarmStartPredictor,
    statistics: HandlerStatistics,
    cancel: CancellationToken,
}

impl InvocationHandler {
    /// Handler with the system clock, an in-memory history and a simulated cold start
    pub fn new(config: Arc<PrewarmConfig>) -> Self {
        InvocationHandlerBuilder::new(config).build()
    }

    pub fn builder(config: Arc<PrewarmConfig>) -> InvocationHandlerBuilder {
        InvocationHandlerBuilder::new(config)
    }

    /// Handle one event; the payload is accepted but not inspected
    pub async fn handle(&self, event: &serde_json::Value) -> InvocationResponse {
        self.handle_detailed(event).await.response
    }

    pub async fn handle_detailed(&self, event: &serde_json::Value) -> InvocationOutcome {
        tracing::trace!(%event, "invocation received");
        let started = Instant::now();

        match self.process().await {
            Ok(prediction) => {
                self.statistics.record_decision(prediction.decision);
                InvocationOutcome {
                    response: InvocationResponse::for_decision(prediction.decision),
                    prediction: Some(prediction),
                    latency: started.elapsed(),
                }
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "invocation failed");
                self.statistics.record_failure();
                InvocationOutcome {
                    response: InvocationResponse::internal_error(),
                    prediction: None,
                    latency: started.elapsed(),
                }
            }
        }
    }

    async fn process(&self) -> Result<PredictionResult> {
        let now = self.clock.now()?;
        self.estimator
            .record_invocation(now)
            .context("recording invocation")?;

        let frequency = self
            .estimator
            .estimate_frequency(now)
            .context("estimating frequency")?;
        let prediction = self.predictor.evaluate(frequency);

        info!(
            frequency = prediction.frequency,
            confidence = prediction.confidence,
            decision = %prediction.decision,
            "prediction"
        );

        match prediction.decision {
            Decision::Warm => debug!("Using existing container"),
            Decision::Cold => {
                debug!("Cold start path triggered");
                self.predictor.cold_start_with(&self.cancel).await?;
            }
        }

        Ok(prediction)
    }

    pub fn estimator(&self) -> &FrequencyEstimator {
        &self.estimator
    }

    pub fn predictor(&self) -> &WarmStartPredictor {
        &self.predictor
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        self.statistics.snapshot()
    }

    /// Abort any cold start currently waiting, and every later one
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Builder for [`InvocationHandler`]
pub struct InvocationHandlerBuilder {
    config: Arc<PrewarmConfig>,
    clock: Option<Arc<dyn Clock>>,
    history: Option<Arc<dyn HistoryStore>>,
    cold_start: Option<Arc<dyn ColdStart>>,
    cancel: Option<CancellationToken>,
}

impl InvocationHandlerBuilder {
    pub fn new(config: Arc<PrewarmConfig>) -> Self {
        Self {
            config,
            clock: None,
            history: None,
            cold_start: None,
            cancel: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_cold_start(mut self, cold_start: Arc<dyn ColdStart>) -> Self {
        self.cold_start = Some(cold_start);
        self
    }

    /// Share a cancellation token, e.g. with a process-level shutdown signal
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> InvocationHandler {
        let config = self.config;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let history = self
            .history
            .unwrap_or_else(|| Arc::new(InMemoryHistory::from_config(&config)));
        let cold_start = self
            .cold_start
            .unwrap_or_else(|| Arc::new(SimulatedColdStart::new(config.cold_start_delay())));

        InvocationHandler {
            clock,
            estimator: FrequencyEstimator::new(history, Arc::clone(&config)),
            predictor: WarmStartPredictor::new(config, cold_start),
            statistics: HandlerStatistics::new(),
            cancel: self.cancel.unwrap_or_default(),
        }
    }
}
