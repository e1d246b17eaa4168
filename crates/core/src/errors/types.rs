//! Core error type definitions

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for prewarm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for prewarm operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The time source could not produce a timestamp
    ClockUnavailable { message: String },

    /// The invocation history store rejected a read or an append
    HistoryUnavailable { operation: String, message: String },

    /// A simulated cold start was cancelled before its delay elapsed
    ColdStartAborted { elapsed: Duration },

    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Short machine-readable name of the failure kind, used in log fields
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ClockUnavailable { .. } => "clock_unavailable",
            Error::HistoryUnavailable { .. } => "history_unavailable",
            Error::ColdStartAborted { .. } => "cold_start_aborted",
            Error::Configuration { .. } => "configuration",
            Error::FileSystem { .. } => "file_system",
            Error::Json { .. } => "json",
        }
    }
}
