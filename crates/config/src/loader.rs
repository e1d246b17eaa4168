//! Configuration loading with precedence and validation
//!
//! Precedence, lowest to highest: built-in defaults, the JSON config file,
//! `PREWARM_*` environment variables, command line overrides.

use crate::config::{PrewarmConfig, RetentionPolicy};
use prewarm_core::{
    constants::{
        CONFIG_DIR_NAME, CONFIG_FILE_NAME, PREWARM_COLD_START_DELAY_VAR,
        PREWARM_CONFIDENCE_THRESHOLD_VAR, PREWARM_CONFIG_VAR, PREWARM_RETENTION_VAR,
        PREWARM_WARM_REUSE_DELAY_VAR, PREWARM_WINDOW_HOURS_VAR,
    },
    Error, Result, ResultExt,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

/// Optional per-field overrides coming from one configuration layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub window_size_hours: Option<f64>,
    pub confidence_threshold: Option<f64>,
    pub cold_start_delay_secs: Option<f64>,
    pub warm_reuse_delay_secs: Option<f64>,
    pub high_confidence: Option<f64>,
    pub low_confidence: Option<f64>,
    pub frequency_cutoff: Option<f64>,
    pub retention: Option<RetentionPolicy>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == ConfigOverrides::default()
    }

    /// Overwrite every field of `config` that this layer sets
    pub fn apply_to(&self, config: &mut PrewarmConfig) {
        if let Some(v) = self.window_size_hours {
            config.window_size_hours = v;
        }
        if let Some(v) = self.confidence_threshold {
            config.confidence_threshold = v;
        }
        if let Some(v) = self.cold_start_delay_secs {
            config.cold_start_delay_secs = v;
        }
        if let Some(v) = self.warm_reuse_delay_secs {
            config.warm_reuse_delay_secs = v;
        }
        if let Some(v) = self.high_confidence {
            config.high_confidence = v;
        }
        if let Some(v) = self.low_confidence {
            config.low_confidence = v;
        }
        if let Some(v) = self.frequency_cutoff {
            config.frequency_cutoff = v;
        }
        if let Some(v) = self.retention {
            config.retention = v;
        }
    }
}

/// Effective configuration plus the highest-precedence layer that touched it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: PrewarmConfig,
    pub source: ConfigSource,
}

/// Configuration loader that handles precedence
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that resolves the config file path from the environment
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Use an explicit config file instead of the resolved default path
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load configuration with full precedence handling, CLI excluded
    pub fn load(&self) -> Result<LoadedConfig> {
        let mut loaded = LoadedConfig {
            config: PrewarmConfig::default(),
            source: ConfigSource::Default,
        };

        if let Some(path) = self.resolve_config_path() {
            if let Some(file_overrides) = Self::load_from_config_file(&path)? {
                file_overrides.apply_to(&mut loaded.config);
                loaded.source = ConfigSource::ConfigFile(path);
            }
        }

        let env_overrides = Self::load_from_env()?;
        if !env_overrides.is_empty() {
            env_overrides.apply_to(&mut loaded.config);
            loaded.source = ConfigSource::EnvironmentVariable("PREWARM_*".to_string());
        }

        loaded.config.validate()?;
        tracing::debug!(source = ?loaded.source, "configuration loaded");
        Ok(loaded)
    }

    /// Apply command line arguments (highest precedence)
    pub fn apply_cli_overrides(
        mut loaded: LoadedConfig,
        overrides: &ConfigOverrides,
    ) -> Result<LoadedConfig> {
        if overrides.is_empty() {
            return Ok(loaded);
        }

        overrides.apply_to(&mut loaded.config);
        loaded.config.validate()?;
        loaded.source = ConfigSource::CommandLine;
        Ok(loaded)
    }

    fn resolve_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(PREWARM_CONFIG_VAR) {
            return Some(PathBuf::from(path));
        }

        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg_config_home) => Some(PathBuf::from(xdg_config_home)),
            Err(_) => dirs::config_dir(),
        };

        config_dir.map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from config file; a missing file is not an error
    fn load_from_config_file(path: &Path) -> Result<Option<ConfigOverrides>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file found");
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read config file", e))?;

        let overrides: ConfigOverrides = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;

        Ok(Some(overrides))
    }

    /// Load configuration from environment variables
    fn load_from_env() -> Result<ConfigOverrides> {
        Ok(ConfigOverrides {
            window_size_hours: env_value(PREWARM_WINDOW_HOURS_VAR)?,
            confidence_threshold: env_value(PREWARM_CONFIDENCE_THRESHOLD_VAR)?,
            cold_start_delay_secs: env_value(PREWARM_COLD_START_DELAY_VAR)?,
            warm_reuse_delay_secs: env_value(PREWARM_WARM_REUSE_DELAY_VAR)?,
            retention: env_value(PREWARM_RETENTION_VAR)?,
            ..ConfigOverrides::default()
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn env_value<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::configuration(format!("invalid value '{raw}' for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
