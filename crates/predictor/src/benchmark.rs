//! Latency comparison between always paying the cold start and the
//! predictive handler

use crate::cold_start::{ColdStart, SimulatedColdStart};
use crate::handler::InvocationHandler;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use prewarm_config::PrewarmConfig;
use prewarm_core::{Decision, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How a benchmark run is shaped
#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    /// Invocations per strategy
    pub iterations: usize,
    /// Idle time between invocations
    pub pause: Duration,
    /// Records spread evenly across the window before the predictive run
    pub seed_invocations: usize,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            iterations: 10,
            pause: Duration::from_millis(100),
            seed_invocations: 0,
        }
    }
}

/// Latency summary for one strategy, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub average_latency: f64,
    pub std_dev: f64,
    pub raw_latencies: Vec<f64>,
}

impl LatencySummary {
    /// Mean and population standard deviation, rounded to milliseconds
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let (mean, std_dev) = if samples.is_empty() {
            (0.0, 0.0)
        } else {
            let n = samples.len() as f64;
            let mean = samples.iter().sum::<f64>() / n;
            let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        Self {
            average_latency: round3(mean),
            std_dev: round3(std_dev),
            raw_latencies: samples,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub traditional: LatencySummary,
    pub predictive: LatencySummary,
    pub warm_starts: u64,
    pub cold_starts: u64,
    pub improvement_percentage: f64,
}

/// Run both strategies back to back
pub async fn run_benchmark(
    config: Arc<PrewarmConfig>,
    options: &BenchmarkOptions,
) -> Result<BenchmarkReport> {
    if options.iterations == 0 {
        return Err(Error::configuration("benchmark needs at least one iteration"));
    }

    tracing::info!(iterations = options.iterations, "Testing traditional cold start approach");
    let traditional = LatencySummary::from_samples(run_traditional(&config, options).await?);

    tracing::info!(iterations = options.iterations, "Testing predictive approach");
    let handler = InvocationHandler::new(Arc::clone(&config));
    seed_history(&handler, &config, options.seed_invocations, Utc::now())?;
    let predictive = LatencySummary::from_samples(run_predictive(&handler, &config, options).await?);

    let stats = handler.statistics();
    if stats.failures > 0 {
        return Err(Error::configuration(format!(
            "{} predictive invocations failed during the benchmark",
            stats.failures
        )));
    }

    let improvement_percentage = if traditional.average_latency > 0.0 {
        round3(
            (traditional.average_latency - predictive.average_latency)
                / traditional.average_latency
                * 100.0,
        )
    } else {
        0.0
    };

    Ok(BenchmarkReport {
        traditional,
        predictive,
        warm_starts: stats.warm_starts,
        cold_starts: stats.cold_starts,
        improvement_percentage,
    })
}

async fn run_traditional(config: &PrewarmConfig, options: &BenchmarkOptions) -> Result<Vec<f64>> {
    let cold_start = SimulatedColdStart::new(config.cold_start_delay());
    let never = CancellationToken::new();
    let mut latencies = Vec::with_capacity(options.iterations);

    for _ in 0..options.iterations {
        let started = Instant::now();
        cold_start.provision(&never).await?;
        latencies.push(round3(started.elapsed().as_secs_f64()));
        tokio::time::sleep(options.pause).await;
    }

    Ok(latencies)
}

async fn run_predictive(
    handler: &InvocationHandler,
    config: &PrewarmConfig,
    options: &BenchmarkOptions,
) -> Result<Vec<f64>> {
    let event = serde_json::json!({ "data": "sample" });
    let mut latencies = Vec::with_capacity(options.iterations);

    for _ in 0..options.iterations {
        let started = Instant::now();
        let outcome = handler.handle_detailed(&event).await;
        if matches!(outcome.prediction, Some(p) if p.decision == Decision::Warm) {
            tokio::time::sleep(config.warm_reuse_delay()).await;
        }
        latencies.push(round3(started.elapsed().as_secs_f64()));
        tokio::time::sleep(options.pause).await;
    }

    Ok(latencies)
}

/// Spread `count` records evenly over the window ending at `now`
pub fn seed_history(
    handler: &InvocationHandler,
    config: &PrewarmConfig,
    count: usize,
    now: DateTime<Utc>,
) -> Result<()> {
    if count == 0 {
        return Ok(());
    }

    let window_ms = (config.window_size_hours * 3_600_000.0) as i64;
    let step = if count > 1 { window_ms / (count as i64 - 1) } else { 0 };
    let oldest = now - ChronoDuration::milliseconds(step * (count as i64 - 1));

    for i in 0..count as i64 {
        handler
            .estimator()
            .record_invocation(oldest + ChronoDuration::milliseconds(step * i))?;
    }

    Ok(())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_summary() {
        let summary = LatencySummary::from_samples(vec![0.1, 0.1, 0.5, 0.5]);
        assert_eq!(summary.average_latency, 0.3);
        assert_eq!(summary.std_dev, 0.2);
        assert_eq!(summary.raw_latencies.len(), 4);

        let empty = LatencySummary::from_samples(Vec::new());
        assert_eq!(empty.average_latency, 0.0);
        assert_eq!(empty.std_dev, 0.0);
    }

    #[test]
    fn test_seed_history_spans_window() {
        let config = Arc::new(PrewarmConfig::default());
        let handler = InvocationHandler::new(Arc::clone(&config));
        let now = Utc::now();

        seed_history(&handler, &config, 13, now).unwrap();
        let estimator = handler.estimator();
        assert_eq!(estimator.history().len().unwrap(), 13);
        assert_eq!(estimator.estimate_frequency(now).unwrap(), 13.0 / 24.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_iterations_rejected() {
        let options = BenchmarkOptions {
            iterations: 0,
            ..Default::default()
        };
        assert!(run_benchmark(Arc::new(PrewarmConfig::default()), &options)
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_benchmark_improves_latency() {
        let config = PrewarmConfig::builder()
            .with_warm_reuse_delay(Duration::from_millis(20))
            .build()
            .unwrap();
        let options = BenchmarkOptions {
            iterations: 5,
            pause: Duration::from_millis(10),
            seed_invocations: 12,
        };

        let report = run_benchmark(Arc::new(config), &options).await.unwrap();
        assert_eq!(report.traditional.raw_latencies.len(), 5);
        assert_eq!(report.warm_starts, 5);
        assert_eq!(report.cold_starts, 0);
        assert!(report.predictive.average_latency < report.traditional.average_latency);
        assert!(report.improvement_percentage > 0.0);
    }
}
