// Anonbench - Anonymization Strategy Benchmark
// Copyright (c) 2025 Anonbench Contributors
// Licensed under the MIT License

//! # Anonbench - Anonymization Strategy Benchmark
//!
//! Anonbench measures how long three tabular-data anonymization methods take
//! on synthetic datasets of increasing size.
//!
//! ## Overview
//!
//! This library provides:
//! - **Generating** reproducible synthetic person records from a seed
//! - **Anonymizing** datasets with deterministic, shuffle or bitwise methods
//! - **Reversing** the shuffle and bitwise methods, with optional verification
//! - **Timing** every (method, size) pair and reporting the results
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Dataset generator and benchmark runner
//! - [`anonymization`] - Strategies and the strategy registry
//! - [`domain`] - Values, records, datasets and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use anonbench::anonymization::StrategyRegistry;
//! use anonbench::config::AnonbenchConfig;
//! use anonbench::core::benchmark::{BenchmarkRunner, BenchmarkSummary, RunOptions};
//! use anonbench::core::generator::DatasetGenerator;
//!
//! let config = AnonbenchConfig::default();
//! let registry = StrategyRegistry::new(&config.anonymization)?;
//! let generator = DatasetGenerator::new(config.generator.seed);
//!
//! let runner = BenchmarkRunner::new(&registry, generator, RunOptions::default());
//! let records = runner.run(&["deterministic", "shuffle", "bitwise"], &[10, 100])?;
//! assert_eq!(records.len(), 6);
//!
//! print!("{}", BenchmarkSummary::from_measurements(&records).render_text());
//! # Ok::<(), anonbench::domain::BenchError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::BenchError`]:
//!
//! ```rust
//! use anonbench::core::generator::DatasetGenerator;
//! use anonbench::domain::BenchError;
//!
//! let err = DatasetGenerator::default().generate(-1).unwrap_err();
//! assert!(matches!(err, BenchError::InvalidSize { size: -1 }));
//! ```
//!
//! ## Logging
//!
//! Anonbench uses structured logging with the `tracing` crate. The runner
//! emits run start and finish at `info` and one `debug` event per measurement.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
