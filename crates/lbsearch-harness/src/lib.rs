//! Benchmark harness for `lbsearch`.
//!
//! The performance gate measures `lbsearch::lower_bound` and the standard
//! library binary search over the same dataset and query, and fails when the
//! former is slower than the latter.

pub mod config;
pub mod error;
pub mod log;
pub mod perf_gate;

pub use config::PerfGateConfig;
pub use error::{HarnessError, Result};
