//! Domain types shared by the estimator, predictor and handler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    COLD_MESSAGE, INTERNAL_ERROR_MESSAGE, STATUS_INTERNAL_ERROR, STATUS_OK, WARM_MESSAGE,
};

/// A single observed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub timestamp: DateTime<Utc>,
}

impl InvocationRecord {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Age of this record relative to `now`, in fractional hours.
    ///
    /// Millisecond resolution. Negative when the record lies in the future.
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.timestamp).num_milliseconds() as f64 / crate::constants::MILLIS_PER_HOUR
    }
}

/// Outcome of the warm/cold branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// Reuse an already initialised execution context
    Warm,
    /// Pay the simulated initialisation delay
    Cold,
}

impl Decision {
    /// Response message returned to the caller for this path
    pub fn message(self) -> &'static str {
        match self {
            Decision::Warm => WARM_MESSAGE,
            Decision::Cold => COLD_MESSAGE,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Warm => write!(f, "WARM"),
            Decision::Cold => write!(f, "COLD"),
        }
    }
}

/// Every value computed for one invocation, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub frequency: f64,
    pub confidence: f64,
    pub decision: Decision,
}

/// JSON body carried inside [`InvocationResponse::body`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
}

/// Structured result handed back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Serialized [`ResponseBody`]
    pub body: String,
}

impl InvocationResponse {
    /// Successful response for the given decision path
    pub fn for_decision(decision: Decision) -> Self {
        Self::with_message(STATUS_OK, decision.message())
    }

    /// Generic failure response; details stay in the logs
    pub fn internal_error() -> Self {
        Self::with_message(STATUS_INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    fn with_message(status_code: u16, message: &str) -> Self {
        let body = ResponseBody {
            message: message.to_string(),
        };
        Self {
            status_code,
            // A struct with a single String field always serializes
            body: serde_json::to_string(&body)
                .unwrap_or_else(|_| format!("{{\"message\":\"{message}\"}}")),
        }
    }

    /// Decode the body back into its message
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<ResponseBody>(&self.body)
            .ok()
            .map(|b| b.message)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}
