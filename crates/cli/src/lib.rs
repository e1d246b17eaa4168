//! Command line front end for prewarm

pub mod commands;
pub mod logging;

use clap::{Args, Parser};
use prewarm_config::{ConfigLoader, ConfigOverrides, LoadedConfig, RetentionPolicy};
use prewarm_core::Result;
use std::path::PathBuf;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "prewarm")]
#[command(about = "Predict warm or cold starts for serverless invocations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration overrides shared by every subcommand
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Path to a JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lookback window in hours
    #[arg(long, global = true)]
    pub window_hours: Option<f64>,

    /// Minimum confidence for a warm decision
    #[arg(long, global = true)]
    pub confidence_threshold: Option<f64>,

    /// Simulated cold start delay in seconds
    #[arg(long, global = true)]
    pub cold_start_delay_secs: Option<f64>,

    /// Simulated cost of reusing a warm context in seconds
    #[arg(long, global = true)]
    pub warm_reuse_delay_secs: Option<f64>,

    /// History retention (window or unbounded)
    #[arg(long, global = true)]
    pub retention: Option<RetentionPolicy>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            window_size_hours: self.window_hours,
            confidence_threshold: self.confidence_threshold,
            cold_start_delay_secs: self.cold_start_delay_secs,
            warm_reuse_delay_secs: self.warm_reuse_delay_secs,
            retention: self.retention,
            ..Default::default()
        }
    }

    /// Defaults, then file, then environment, then these flags
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }

        let loaded = loader.load()?;
        ConfigLoader::apply_cli_overrides(loaded, &self.overrides())
    }
}
