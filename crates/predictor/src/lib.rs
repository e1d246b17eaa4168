//! Warm/cold start prediction for prewarm
//!
//! This crate provides the decision unit called on every invocation:
//! - `history`: injected, lock-guarded invocation history with retention
//! - `estimator`: invocations-per-hour over the lookback window
//! - `predictor`: frequency → confidence → warm/cold decision
//! - `cold_start`: cancellable simulated initialisation delay
//! - `handler`: the per-event entry point and its statistics
//! - `benchmark`: latency comparison against always-cold execution

pub mod benchmark;
pub mod cold_start;
pub mod estimator;
pub mod handler;
pub mod history;
pub mod predictor;
pub mod stats;

pub use benchmark::{run_benchmark, BenchmarkOptions, BenchmarkReport, LatencySummary};
pub use cold_start::{ColdStart, SimulatedColdStart};
pub use estimator::FrequencyEstimator;
pub use handler::{InvocationHandler, InvocationHandlerBuilder, InvocationOutcome};
pub use history::{HistoryStore, InMemoryHistory};
pub use predictor::WarmStartPredictor;
pub use stats::{HandlerStatistics, StatisticsSnapshot};
