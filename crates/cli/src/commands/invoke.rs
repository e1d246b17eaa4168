use prewarm_config::PrewarmConfig;
use prewarm_core::{Result, ResultExt};
use prewarm_predictor::{InvocationHandler, InvocationOutcome};
use std::sync::Arc;

/// Handle one event with a fresh handler
pub async fn run(config: Arc<PrewarmConfig>, event: Option<&str>) -> Result<InvocationOutcome> {
    let event = match event {
        Some(raw) => serde_json::from_str(raw).context("parsing --event payload")?,
        None => serde_json::json!({}),
    };

    let handler = InvocationHandler::new(config);
    Ok(handler.handle_detailed(&event).await)
}

pub async fn execute(config: Arc<PrewarmConfig>, event: Option<&str>) -> Result<()> {
    let outcome = run(config, event).await?;

    tracing::info!(
        status = outcome.response.status_code,
        latency_ms = outcome.latency.as_millis() as u64,
        "invocation finished"
    );
    println!("{}", serde_json::to_string_pretty(&outcome.response)?);
    Ok(())
}
