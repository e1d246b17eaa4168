use prewarm_config::PrewarmConfig;
use prewarm_core::Result;
use prewarm_predictor::{run_benchmark, BenchmarkOptions};
use std::sync::Arc;
use std::time::Duration;

pub async fn execute(
    config: Arc<PrewarmConfig>,
    iterations: usize,
    pause_ms: u64,
    seed_invocations: usize,
) -> Result<()> {
    let options = BenchmarkOptions {
        iterations,
        pause: Duration::from_millis(pause_ms),
        seed_invocations,
    };

    let report = run_benchmark(config, &options).await?;

    tracing::info!(
        traditional = report.traditional.average_latency,
        predictive = report.predictive.average_latency,
        "Improvement: {:.1}%",
        report.improvement_percentage
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
