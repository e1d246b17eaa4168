//! Core domain types, errors, and constants for `prewarm`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias, including the runtime
//!   failure kinds the invocation handler turns into generic failure responses.
//! - **`types`**: invocation records, the warm/cold `Decision`, per-invocation
//!   `PredictionResult` and the wire-level `InvocationResponse`.
//! - **`clock`**: the `Clock` seam used to timestamp invocations.
//! - **`constants`**: response messages, status codes and environment
//!   variable names.

pub mod clock;
pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    clock::{Clock, ManualClock, SystemClock},
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
