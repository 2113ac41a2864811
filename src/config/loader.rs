//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AnonbenchConfig;
use crate::anonymization::AnonymizationMethod;
use crate::domain::errors::BenchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AnonbenchConfig
/// 4. Applies environment variable overrides (ANONBENCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`BenchError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use anonbench::config::loader::load_config;
///
/// let config = load_config("anonbench.toml")?;
/// println!("sizes: {:?}", config.benchmark.sizes);
/// # Ok::<(), anonbench::domain::BenchError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonbenchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BenchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BenchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AnonbenchConfig = toml::from_str(&contents)
        .map_err(|e| BenchError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Builds configuration from defaults, environment overrides applied
///
/// Used when no configuration file is given.
///
/// # Errors
///
/// Returns [`BenchError::Configuration`] if an override is malformed or the
/// result fails validation.
pub fn load_default_config() -> Result<AnonbenchConfig> {
    finish(AnonbenchConfig::default())
}

fn finish(mut config: AnonbenchConfig) -> Result<AnonbenchConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BenchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BenchError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(BenchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using ANONBENCH_* prefix
///
/// Environment variables follow the pattern: ANONBENCH_<SECTION>_<KEY>
/// For example: ANONBENCH_BENCHMARK_SIZES, ANONBENCH_GENERATOR_SEED
fn apply_env_overrides(config: &mut AnonbenchConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ANONBENCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Benchmark overrides
    if let Ok(val) = std::env::var("ANONBENCH_BENCHMARK_METHODS") {
        config.benchmark.methods = split_list(&val)
            .map(|name| name.parse::<AnonymizationMethod>())
            .collect::<Result<Vec<_>>>()?;
    }
    if let Ok(val) = std::env::var("ANONBENCH_BENCHMARK_SIZES") {
        config.benchmark.sizes = split_list(&val)
            .map(|size| {
                size.parse::<i64>().map_err(|_| {
                    BenchError::Configuration(format!("Invalid ANONBENCH_BENCHMARK_SIZES entry: {size}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
    }
    if let Ok(val) = std::env::var("ANONBENCH_BENCHMARK_TRIALS") {
        if let Ok(trials) = val.parse() {
            config.benchmark.trials = trials;
        }
    }
    if let Ok(val) = std::env::var("ANONBENCH_BENCHMARK_MEASURE_REVERSE") {
        config.benchmark.measure_reverse = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ANONBENCH_BENCHMARK_VERIFY_ROUND_TRIP") {
        config.benchmark.verify_round_trip = val.parse().unwrap_or(false);
    }

    // Generator overrides
    if let Ok(val) = std::env::var("ANONBENCH_GENERATOR_SEED") {
        if let Ok(seed) = val.parse() {
            config.generator.seed = seed;
        }
    }

    // Strategy overrides
    config.anonymization.apply_env_overrides()?;

    // Logging overrides
    if let Ok(val) = std::env::var("ANONBENCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ANONBENCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ANONBENCH_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn split_list(val: &str) -> impl Iterator<Item = &str> {
    val.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ANONBENCH_TEST_SUBST_VAR", "test_value");
        let input = "key = \"${ANONBENCH_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "key = \"test_value\"");
        std::env::remove_var("ANONBENCH_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ANONBENCH_TEST_MISSING_VAR");
        let input = "key = \"${ANONBENCH_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(matches!(result, Err(BenchError::Configuration(msg)) if msg.contains("ANONBENCH_TEST_MISSING_VAR")));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("ANONBENCH_TEST_COMMENTED_VAR");
        let input = "# key = \"${ANONBENCH_TEST_COMMENTED_VAR}\"\nseed = 1";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(BenchError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[benchmark]
methods = ["deterministic"]
sizes = [0, 10]
trials = 3

[generator]
seed = 7

[anonymization]
fields = ["name", "age"]

[anonymization.deterministic]
key = "file-key"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.benchmark.sizes, vec![0, 10]);
        assert_eq!(config.benchmark.trials, 3);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.anonymization.fields, vec!["name", "age"]);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[anonymization.bitwise]\nrotation = 64\n")
            .unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(BenchError::Configuration(msg)) if msg.contains("rotation")));
    }

    #[test]
    fn test_split_list() {
        let items: Vec<&str> = split_list(" a, b ,,c ").collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }
}
