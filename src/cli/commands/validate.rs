//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the anonbench configuration.

use crate::cli::exit_code;
use crate::config::AnonbenchConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// `config` is the result of loading, which already includes validation.
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        config: crate::domain::Result<AnonbenchConfig>,
    ) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("<defaults + environment>");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match config {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("{}", summary(&config));
        Ok(exit_code::SUCCESS)
    }
}

/// Key-free summary of the effective settings
fn summary(config: &AnonbenchConfig) -> String {
    let methods: Vec<&str> = config.benchmark.methods.iter().map(|m| m.as_str()).collect();
    let fields = if config.anonymization.fields.is_empty() {
        "all".to_string()
    } else {
        config.anonymization.fields.join(", ")
    };
    let shuffle_seed = if config.anonymization.shuffle.random_seed {
        "random".to_string()
    } else {
        config.anonymization.shuffle.seed.to_string()
    };

    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Methods: {}", methods.join(", ")),
        format!("  Sizes: {:?}", config.benchmark.sizes),
        format!("  Trials: {}", config.benchmark.trials),
        format!("  Measure Reverse: {}", config.benchmark.measure_reverse),
        format!("  Verify Round Trip: {}", config.benchmark.verify_round_trip),
        format!("  Generator Seed: {}", config.generator.seed),
        format!("  Fields: {fields}"),
        format!("  Shuffle Seed: {shuffle_seed}"),
        format!("  Bitwise Rotation: {}", config.anonymization.bitwise.rotation),
    ];
    if config.logging.local_enabled {
        lines.push(format!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }
    lines.join("\n")
}
