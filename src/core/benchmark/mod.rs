//! Benchmark orchestration
//!
//! - [`runner`] - sequential (method, size) driver with timing
//! - [`measurement`] - per-iteration timing records
//! - [`summary`] - grouping and report output

pub mod measurement;
pub mod runner;
pub mod summary;

pub use measurement::Measurement;
pub use runner::{BenchmarkRunner, RunOptions};
pub use summary::{BenchmarkReport, BenchmarkSummary};
