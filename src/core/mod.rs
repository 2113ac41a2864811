//! Core benchmark logic for anonbench.
//!
//! This module generates the synthetic datasets and drives the strategies over
//! them. It performs no I/O.
//!
//! # Modules
//!
//! - [`generator`] - Seeded synthetic dataset generation
//! - [`benchmark`] - Runner, measurement records and summaries
//!
//! # Benchmark Workflow
//!
//! 1. **Resolve**: Parse and de-duplicate the requested methods
//! 2. **Generate**: Build a dataset of the requested size from the seed
//! 3. **Time**: Run the strategy's anonymize call under a monotonic clock
//! 4. **Reverse** (optional): Time deanonymize and verify the round trip
//! 5. **Report**: Group measurements by method
//!
//! # Example
//!
//! ```rust
//! use anonbench::anonymization::{AnonymizationConfig, StrategyRegistry};
//! use anonbench::core::benchmark::{BenchmarkRunner, BenchmarkSummary, RunOptions};
//! use anonbench::core::generator::DatasetGenerator;
//!
//! let registry = StrategyRegistry::new(&AnonymizationConfig::default())?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let runner = BenchmarkRunner::new(&registry, DatasetGenerator::default(), RunOptions::default())
//!     .with_shutdown(shutdown_rx);
//! let records = runner.run(&["deterministic"], &[0, 100])?;
//!
//! let summary = BenchmarkSummary::from_measurements(&records);
//! print!("{}", summary.render_text());
//! # Ok::<(), anonbench::domain::BenchError>(())
//! ```

pub mod benchmark;
pub mod generator;
