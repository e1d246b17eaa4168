//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach(e.into(), message.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach(e.into(), f()))
    }
}

// Runtime failure kinds keep their variant so the handler can still classify
// them; everything else collapses into a configuration error.
fn attach(error: Error, context: String) -> Error {
    match error {
        Error::ClockUnavailable { message } => Error::ClockUnavailable {
            message: format!("{context}: {message}"),
        },
        Error::HistoryUnavailable { operation, message } => Error::HistoryUnavailable {
            operation,
            message: format!("{context}: {message}"),
        },
        aborted @ Error::ColdStartAborted { .. } => aborted,
        other => Error::Configuration {
            message: format!("{context}: {other}"),
        },
    }
}
