use clap::Subcommand;
use prewarm_config::LoadedConfig;
use prewarm_core::Result;
use std::sync::Arc;

pub mod bench;
pub mod config;
pub mod invoke;
pub mod simulate;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run a single invocation and print the response
    Invoke {
        /// Event payload as JSON (accepted, not inspected)
        #[arg(long, value_name = "JSON")]
        event: Option<String>,
    },

    /// Run a series of invocations through one handler
    Simulate {
        /// Number of invocations
        #[arg(long, default_value = "20")]
        count: usize,

        /// Pause between invocations in milliseconds
        #[arg(long, default_value = "100")]
        interval_ms: u64,
    },

    /// Compare always-cold execution against the predictive handler
    Bench {
        /// Invocations per strategy
        #[arg(long, default_value = "10")]
        iterations: usize,

        /// Pause between invocations in milliseconds
        #[arg(long, default_value = "100")]
        pause_ms: u64,

        /// Records spread over the window before the predictive run
        #[arg(long, default_value = "0")]
        seed_invocations: usize,
    },

    /// Print the effective configuration and where it came from
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Invoke { event: None }
    }
}

impl Commands {
    pub async fn execute(self, loaded: LoadedConfig) -> Result<()> {
        match self {
            Commands::Invoke { event } => {
                invoke::execute(Arc::new(loaded.config), event.as_deref()).await
            }
            Commands::Simulate { count, interval_ms } => {
                simulate::execute(Arc::new(loaded.config), count, interval_ms).await
            }
            Commands::Bench {
                iterations,
                pause_ms,
                seed_invocations,
            } => bench::execute(Arc::new(loaded.config), iterations, pause_ms, seed_invocations).await,
            Commands::Config => config::execute(&loaded),
        }
    }
}
