//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output filtered by `RUST_LOG` or the configured level
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use anonbench::logging::init_logging;
//! use anonbench::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config)?;
//!
//! tracing::info!("Application started");
//! # Ok::<(), anonbench::domain::BenchError>(())
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log one completed measurement
///
/// # Example
///
/// ```
/// use anonbench::anonymization::AnonymizationMethod;
/// use anonbench::core::benchmark::Measurement;
/// use anonbench::log_measurement;
/// use std::time::Duration;
///
/// let m = Measurement::new(AnonymizationMethod::Shuffle, 100, Duration::from_millis(3));
/// log_measurement!(&m);
/// ```
#[macro_export]
macro_rules! log_measurement {
    ($measurement:expr) => {
        tracing::debug!(
            method = %$measurement.method,
            size = $measurement.size,
            trials = $measurement.trials,
            elapsed_secs = $measurement.elapsed_secs(),
            reverse_secs = ?$measurement.reverse_secs(),
            "Measurement recorded"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```
/// use anonbench::log_error_with_context;
/// use anonbench::domain::BenchError;
///
/// let error = BenchError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
