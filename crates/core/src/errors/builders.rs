//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;
use std::time::Duration;

impl Error {
    /// Create a clock failure error
    #[must_use]
    pub fn clock_unavailable(message: impl Into<String>) -> Self {
        Error::ClockUnavailable {
            message: message.into(),
        }
    }

    /// Create a history store failure error
    #[must_use]
    pub fn history_unavailable(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::HistoryUnavailable {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a cold start cancellation error
    #[must_use]
    pub fn cold_start_aborted(elapsed: Duration) -> Self {
        Error::ColdStartAborted { elapsed }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}
