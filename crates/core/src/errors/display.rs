//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ClockUnavailable { message } => {
                write!(f, "clock unavailable: {message}")
            }
            Error::HistoryUnavailable { operation, message } => {
                write!(f, "invocation history {operation} failed: {message}")
            }
            Error::ColdStartAborted { elapsed } => {
                write!(f, "cold start aborted after {elapsed:?}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}
