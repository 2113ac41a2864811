//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::exit_code;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "anonbench.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing anonbench configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIG_ERROR);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Put keys in a .env file (ANONBENCH_DETERMINISTIC_KEY, ANONBENCH_BITWISE_KEY)");
                println!("  3. Validate configuration: anonbench --config {} validate-config", self.output);
                println!("  4. Run the benchmark: anonbench --config {} run", self.output);
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_code::FATAL)
            }
        }
    }
}

/// Commented sample configuration with every default spelled out
pub fn sample_config() -> &'static str {
    r#"# anonbench Configuration File
# Benchmarks anonymization methods over generated datasets.
#
# Any value can be overridden with ANONBENCH_<SECTION>_<KEY>, and
# ${VAR} placeholders are replaced from the environment.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[benchmark]
# deterministic | shuffle | bitwise
methods = ["deterministic", "shuffle", "bitwise"]
sizes = [100, 1000, 5000, 10000, 50000, 100000]
# Timed repetitions per (method, size); the mean is reported
trials = 1
# Also time deanonymization for reversible methods
measure_reverse = false
# Fail the run if deanonymization does not restore the data
verify_round_trip = false

[generator]
seed = 42

[anonymization]
# Columns to anonymize; empty means all
fields = []

[anonymization.deterministic]
key = "SecretKey#123"
# key = "${ANONBENCH_KEY}"

[anonymization.shuffle]
seed = 1592592147
# Draw a fresh seed per run (logged at info level)
random_seed = false

[anonymization.bitwise]
key = "SecretKey#123"
# Drives the position-dependent part of the mask
secondary_key = "SecretKet@987"
# Left rotation in bits, 1..=63
rotation = 13

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::config::DEFAULT_SHUFFLE_SEED;
    use crate::config::AnonbenchConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let config: AnonbenchConfig = toml::from_str(sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.anonymization.shuffle.seed, DEFAULT_SHUFFLE_SEED);
        assert_eq!(config.benchmark.sizes, crate::config::DEFAULT_SIZES.to_vec());
        assert_eq!(
            secrecy::ExposeSecret::expose_secret(&config.anonymization.bitwise.secondary_key)
                .as_bytes(),
            crate::config::DEFAULT_SECONDARY_KEY.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("anonbench.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), exit_code::SUCCESS);
        assert!(output.exists());

        // Second run refuses to overwrite
        assert_eq!(args.execute().await.unwrap(), exit_code::CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("anonbench.toml");
        fs::write(&output, "old").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), exit_code::SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), sample_config());
    }
}
