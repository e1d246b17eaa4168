//! Constants used throughout the prewarm codebase

// Response messages
pub const WARM_MESSAGE: &str = "Used pre-warmed container";
pub const COLD_MESSAGE: &str = "Cold start completed";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

// Response status codes
pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

// Environment variable names
pub const PREWARM_CONFIG_VAR: &str = "PREWARM_CONFIG";
pub const PREWARM_WINDOW_HOURS_VAR: &str = "PREWARM_WINDOW_HOURS";
pub const PREWARM_CONFIDENCE_THRESHOLD_VAR: &str = "PREWARM_CONFIDENCE_THRESHOLD";
pub const PREWARM_COLD_START_DELAY_VAR: &str = "PREWARM_COLD_START_DELAY_SECS";
pub const PREWARM_WARM_REUSE_DELAY_VAR: &str = "PREWARM_WARM_REUSE_DELAY_SECS";
pub const PREWARM_RETENTION_VAR: &str = "PREWARM_RETENTION";

// Config file location relative to the user config directory
pub const CONFIG_DIR_NAME: &str = "prewarm";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;
