//! Configuration schema types
//!
//! This module defines the configuration structure for anonbench.

use crate::anonymization::{AnonymizationConfig, AnonymizationMethod};
use crate::core::generator::{COLUMNS, DEFAULT_GENERATOR_SEED};
use serde::{Deserialize, Serialize};

/// Sizes benchmarked when none are given
pub const DEFAULT_SIZES: [i64; 6] = [100, 1000, 5000, 10000, 50000, 100000];

/// Main anonbench configuration
///
/// This is the root configuration structure that maps to the TOML file. Every
/// section is optional; a missing file section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonbenchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Benchmark plan
    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    /// Dataset generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Strategy settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnonbenchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.benchmark.validate()?;
        self.anonymization.validate().map_err(|e| e.to_string())?;
        self.validate_fields()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Every selected field must be a column the generator produces
    fn validate_fields(&self) -> Result<(), String> {
        match self
            .anonymization
            .fields
            .iter()
            .find(|f| !COLUMNS.contains(&f.as_str()))
        {
            Some(field) => Err(format!(
                "Unknown anonymization field '{}'. Must be one of: {}",
                field,
                COLUMNS.join(", ")
            )),
            None => Ok(()),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Benchmark plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Methods to benchmark, in order
    #[serde(default = "default_methods")]
    pub methods: Vec<AnonymizationMethod>,

    /// Dataset sizes, in order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<i64>,

    /// Timed repetitions per (method, size)
    #[serde(default = "default_trials")]
    pub trials: u32,

    /// Also time deanonymize for reversible methods
    #[serde(default)]
    pub measure_reverse: bool,

    /// Fail the run if deanonymize does not restore the input
    #[serde(default)]
    pub verify_round_trip: bool,
}

impl BenchmarkConfig {
    fn validate(&self) -> Result<(), String> {
        if self.methods.is_empty() {
            return Err("benchmark.methods cannot be empty".to_string());
        }

        if self.sizes.is_empty() {
            return Err("benchmark.sizes cannot be empty".to_string());
        }

        if let Some(size) = self.sizes.iter().find(|s| **s < 0) {
            return Err(format!("benchmark.sizes must be non-negative, got {size}"));
        }

        if self.trials == 0 || self.trials > 100 {
            return Err(format!(
                "benchmark.trials must be between 1 and 100, got {}",
                self.trials
            ));
        }

        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            methods: default_methods(),
            sizes: default_sizes(),
            trials: default_trials(),
            measure_reverse: false,
            verify_round_trip: false,
        }
    }
}

/// Dataset generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the synthetic data
    #[serde(default = "default_generator_seed")]
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_generator_seed(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_methods() -> Vec<AnonymizationMethod> {
    AnonymizationMethod::ALL.to_vec()
}

fn default_sizes() -> Vec<i64> {
    DEFAULT_SIZES.to_vec()
}

fn default_trials() -> u32 {
    1
}

fn default_generator_seed() -> u64 {
    DEFAULT_GENERATOR_SEED
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnonbenchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.benchmark.sizes, DEFAULT_SIZES.to_vec());
        assert_eq!(config.benchmark.methods.len(), 3);
        assert_eq!(config.generator.seed, 42);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };
        assert!(config.validate().is_ok());

        config.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_benchmark_config_validation() {
        let mut config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());

        config.sizes = vec![10, -1];
        assert!(config.validate().is_err());

        config.sizes = vec![];
        assert!(config.validate().is_err());

        config.sizes = vec![0];
        config.trials = 0;
        assert!(config.validate().is_err());

        config.trials = 3;
        config.methods.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut config = AnonbenchConfig::default();
        config.anonymization.fields = vec!["name".to_string(), "zip_code".to_string()];
        assert!(config.validate().is_ok());

        config.anonymization.fields = vec!["nmae".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.contains("nmae"), "{err}");
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AnonbenchConfig = toml::from_str(
            r#"
[benchmark]
methods = ["bitwise", "shuffle"]
sizes = [10, 20]

[anonymization.bitwise]
rotation = 7
"#,
        )
        .unwrap();

        assert_eq!(
            config.benchmark.methods,
            vec![AnonymizationMethod::Bitwise, AnonymizationMethod::Shuffle]
        );
        assert_eq!(config.benchmark.trials, 1);
        assert_eq!(config.anonymization.bitwise.rotation, 7);
        assert_eq!(config.application.log_level, "info");
    }

    #[test]
    fn test_unknown_method_in_toml_rejected() {
        let result: Result<AnonbenchConfig, _> = toml::from_str(
            r#"
[benchmark]
methods = ["rot13"]
"#,
        );
        assert!(result.is_err());
    }
}
