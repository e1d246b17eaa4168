use prewarm_config::PrewarmConfig;
use prewarm_core::{Decision, Result};
use prewarm_predictor::{InvocationHandler, InvocationOutcome, StatisticsSnapshot};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One line of simulation output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStep {
    pub invocation: usize,
    pub status_code: u16,
    pub decision: Option<Decision>,
    pub frequency: Option<f64>,
    pub confidence: Option<f64>,
    pub latency_ms: u64,
}

impl SimulationStep {
    fn from_outcome(invocation: usize, outcome: &InvocationOutcome) -> Self {
        Self {
            invocation,
            status_code: outcome.response.status_code,
            decision: outcome.prediction.map(|p| p.decision),
            frequency: outcome.prediction.map(|p| p.frequency),
            confidence: outcome.prediction.map(|p| p.confidence),
            latency_ms: outcome.latency.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    pub statistics: StatisticsSnapshot,
    pub warm_rate: f64,
}

/// Drive `count` invocations through one handler, stopping early once `cancel` fires
pub async fn run(
    config: Arc<PrewarmConfig>,
    count: usize,
    interval: Duration,
    cancel: CancellationToken,
) -> SimulationReport {
    let handler = InvocationHandler::builder(config)
        .with_cancellation(cancel.clone())
        .build();
    let event = serde_json::json!({ "source": "simulate" });
    let mut steps = Vec::with_capacity(count);

    for invocation in 1..=count {
        if cancel.is_cancelled() {
            tracing::info!(completed = invocation - 1, "simulation interrupted");
            break;
        }

        let outcome = handler.handle_detailed(&event).await;
        steps.push(SimulationStep::from_outcome(invocation, &outcome));

        if invocation < count {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    let statistics = handler.statistics();
    SimulationReport {
        steps,
        warm_rate: statistics.warm_rate(),
        statistics,
    }
}

pub async fn execute(config: Arc<PrewarmConfig>, count: usize, interval_ms: u64) -> Result<()> {
    let cancel = CancellationToken::new();
    let listener = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let report = run(config, count, Duration::from_millis(interval_ms), cancel).await;
    listener.abort();

    for step in &report.steps {
        println!("{}", serde_json::to_string(step)?);
    }
    tracing::info!(
        warm_starts = report.statistics.warm_starts,
        cold_starts = report.statistics.cold_starts,
        failures = report.statistics.failures,
        "Warm rate: {:.1}%",
        report.warm_rate
    );
    println!("{}", serde_json::to_string_pretty(&report.statistics)?);
    Ok(())
}
