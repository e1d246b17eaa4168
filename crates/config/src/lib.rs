//! Configuration for prewarm
//!
//! `PrewarmConfig` is built once at process start and shared read-only by the
//! estimator, the predictor and the handler. `ConfigLoader` layers defaults,
//! a JSON config file, `PREWARM_*` environment variables and command line
//! overrides, in that order of precedence.

pub mod config;
pub mod loader;


pub use config::*;
pub use loader::*;
