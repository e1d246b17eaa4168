//! Simulated provisioning of a fresh execution context
//!
//! No resources are allocated; the cold path only waits. The wait is an
//! explicit async primitive with a cancellation contract: when the token
//! fires before the delay elapses, the call resolves with
//! [`Error::ColdStartAborted`]. Callers that never cancel get the fixed
//! delay every time.

use async_trait::async_trait;
use prewarm_core::{Error, Result};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cost paid when no warm context is available
#[async_trait]
pub trait ColdStart: Send + Sync {
    async fn provision(&self, cancel: &CancellationToken) -> Result<()>;
}

/// Cold start that sleeps for a fixed delay
#[derive(Debug, Clone, Copy)]
pub struct SimulatedColdStart {
    delay: Duration,
}

impl SimulatedColdStart {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ColdStart for SimulatedColdStart {
    async fn provision(&self, cancel: &CancellationToken) -> Result<()> {
        tracing::info!(delay_ms = self.delay.as_millis() as u64, "Starting a cold start");
        let started = Instant::now();

        tokio::select! {
            // Completion wins if both are ready
            biased;
            _ = tokio::time::sleep(self.delay) => Ok(()),
            _ = cancel.cancelled() => {
                let elapsed = started.elapsed();
                tracing::warn!(elapsed_ms = elapsed.as_millis() as u64, "cold start cancelled");
                Err(Error::cold_start_aborted(elapsed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_full_delay() {
        let cold_start = SimulatedColdStart::new(Duration::from_millis(100));
        let started = Instant::now();

        cold_start.provision(&CancellationToken::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_wait() {
        let cold_start = SimulatedColdStart::new(Duration::from_secs(10));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            trigger.cancel();
        });

        let err = cold_start.provision(&cancel).await.unwrap_err();
        match err {
            Error::ColdStartAborted { elapsed } => {
                assert!(elapsed >= Duration::from_secs(2));
                assert!(elapsed < Duration::from_secs(10));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
