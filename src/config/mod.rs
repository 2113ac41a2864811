//! Configuration management for anonbench.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! anonbench reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ANONBENCH_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation before any benchmark runs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anonbench::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anonbench.toml")?;
//!
//! println!("Methods: {:?}", config.benchmark.methods);
//! println!("Sizes: {:?}", config.benchmark.sizes);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`BenchmarkConfig`] - Methods, sizes and trial count
//! - [`GeneratorConfig`] - Synthetic data seed
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Strategy keys, seed and rotation
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [benchmark]
//! methods = ["deterministic", "shuffle", "bitwise"]
//! sizes = [100, 1000, 10000]
//! trials = 3
//!
//! [anonymization.deterministic]
//! key = "${ANONBENCH_KEY}"
//!
//! [anonymization.bitwise]
//! key = "${ANONBENCH_KEY}"
//! rotation = 13
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_default_config};
pub use schema::{
    AnonbenchConfig, ApplicationConfig, BenchmarkConfig, GeneratorConfig, LoggingConfig,
    DEFAULT_SIZES,
};
pub use secret::{
    default_key, default_secondary_key, secret_key, KeyMaterial, SecretKey, DEFAULT_KEY,
    DEFAULT_SECONDARY_KEY,
};
