//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for anonbench using clap.

pub mod commands;

use crate::config::{load_config, load_default_config, AnonbenchConfig};
use crate::domain::{BenchError, Result};
use clap::{Parser, Subcommand};

/// Process exit codes
pub mod exit_code {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Configuration could not be loaded or is invalid
    pub const CONFIG_ERROR: i32 = 2;
    /// The benchmark run failed
    pub const BENCHMARK_ERROR: i32 = 3;
    /// Unexpected failure
    pub const FATAL: i32 = 5;
    /// Stopped by SIGINT/SIGTERM
    pub const INTERRUPTED: i32 = 130;
}

/// anonbench - anonymization strategy benchmark
#[derive(Parser, Debug)]
#[command(name = "anonbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, env = "ANONBENCH_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "ANONBENCH_LOG_LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        ignore_case = true
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the configured file, or defaults plus environment overrides
    pub fn load_config(&self) -> Result<AnonbenchConfig> {
        match &self.config {
            Some(path) => load_config(path),
            None => load_default_config(),
        }
    }
}

/// Exit code when logging cannot be initialized
///
/// A bad level is a configuration problem; anything else (such as an
/// unwritable log directory) is fatal.
pub fn logging_exit_code(error: &BenchError) -> i32 {
    match error {
        BenchError::Configuration(_) => exit_code::CONFIG_ERROR,
        _ => exit_code::FATAL,
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark anonymization methods over generated datasets
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
