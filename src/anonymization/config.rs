//! Anonymization configuration

use crate::config::secret::{default_key, default_secondary_key, secret_key, SecretKey};
use crate::domain::{BenchError, Result};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Seed used by the shuffle method unless configured otherwise
pub const DEFAULT_SHUFFLE_SEED: u64 = 0x5EED_0713;

/// Left-rotation applied by the bitwise method after masking
pub const DEFAULT_ROTATION: u32 = 13;

/// Anonymization method
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizationMethod {
    /// Keyed one-way hash; equal inputs give equal outputs
    Deterministic,
    /// Seeded per-column permutation; preserves the value multiset
    Shuffle,
    /// XOR mask and bit rotation on the value's binary form
    Bitwise,
}

impl AnonymizationMethod {
    /// Every method, in registry order
    pub const ALL: [AnonymizationMethod; 3] = [
        AnonymizationMethod::Deterministic,
        AnonymizationMethod::Shuffle,
        AnonymizationMethod::Bitwise,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            AnonymizationMethod::Deterministic => "deterministic",
            AnonymizationMethod::Shuffle => "shuffle",
            AnonymizationMethod::Bitwise => "bitwise",
        }
    }

    /// Whether the method has an inverse
    pub fn is_reversible(&self) -> bool {
        !matches!(self, AnonymizationMethod::Deterministic)
    }
}

impl fmt::Display for AnonymizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnonymizationMethod {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "deterministic" => Ok(AnonymizationMethod::Deterministic),
            "shuffle" => Ok(AnonymizationMethod::Shuffle),
            "bitwise" => Ok(AnonymizationMethod::Bitwise),
            _ => Err(BenchError::UnknownMethod(s.to_string())),
        }
    }
}

/// Columns a strategy transforms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelection {
    /// Every column
    #[default]
    All,
    /// Only the named columns; others pass through unchanged
    Only(BTreeSet<String>),
}

impl FieldSelection {
    /// An empty list selects every column
    pub fn from_fields(fields: &[String]) -> Self {
        if fields.is_empty() {
            FieldSelection::All
        } else {
            FieldSelection::Only(fields.iter().cloned().collect())
        }
    }

    /// Whether `field` is transformed
    pub fn includes(&self, field: &str) -> bool {
        match self {
            FieldSelection::All => true,
            FieldSelection::Only(set) => set.contains(field),
        }
    }
}

/// Settings for every strategy in the registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Columns to anonymize (empty = all)
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub deterministic: DeterministicConfig,

    #[serde(default)]
    pub shuffle: ShuffleConfig,

    #[serde(default)]
    pub bitwise: BitwiseConfig,
}

/// Deterministic method settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterministicConfig {
    /// Hash key
    #[serde(default = "default_key")]
    pub key: SecretKey,
}

impl Default for DeterministicConfig {
    fn default() -> Self {
        Self { key: default_key() }
    }
}

/// Shuffle method settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Permutation seed
    #[serde(default = "default_shuffle_seed")]
    pub seed: u64,

    /// Draw a fresh seed from OS entropy instead of `seed`
    #[serde(default)]
    pub random_seed: bool,
}

fn default_shuffle_seed() -> u64 {
    DEFAULT_SHUFFLE_SEED
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SHUFFLE_SEED,
            random_seed: false,
        }
    }
}

/// Bitwise method settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitwiseConfig {
    /// Key the mask stream is derived from
    #[serde(default = "default_key")]
    pub key: SecretKey,

    /// Key the position-dependent stream is derived from
    #[serde(default = "default_secondary_key")]
    pub secondary_key: SecretKey,

    /// Left-rotation in bits, 1..=63
    #[serde(default = "default_rotation")]
    pub rotation: u32,
}

fn default_rotation() -> u32 {
    DEFAULT_ROTATION
}

impl Default for BitwiseConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            secondary_key: default_secondary_key(),
            rotation: DEFAULT_ROTATION,
        }
    }
}

impl AnonymizationConfig {
    /// Field selection built from `fields`
    pub fn field_selection(&self) -> FieldSelection {
        FieldSelection::from_fields(&self.fields)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err(BenchError::Configuration(
                "anonymization.fields must not contain empty names".to_string(),
            ));
        }
        if self.deterministic.key.expose_secret().is_empty() {
            return Err(BenchError::Configuration(
                "deterministic.key cannot be empty".to_string(),
            ));
        }
        if self.bitwise.key.expose_secret().is_empty() {
            return Err(BenchError::Configuration(
                "bitwise.key cannot be empty".to_string(),
            ));
        }
        if self.bitwise.secondary_key.expose_secret().is_empty() {
            return Err(BenchError::Configuration(
                "bitwise.secondary_key cannot be empty".to_string(),
            ));
        }
        if !(1..=63).contains(&self.bitwise.rotation) {
            return Err(BenchError::Configuration(format!(
                "bitwise.rotation must be between 1 and 63, got {}",
                self.bitwise.rotation
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ANONBENCH_ANONYMIZATION_FIELDS") {
            self.fields = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(val) = std::env::var("ANONBENCH_DETERMINISTIC_KEY") {
            self.deterministic.key = secret_key(val);
        }

        if let Ok(val) = std::env::var("ANONBENCH_SHUFFLE_SEED") {
            if val.eq_ignore_ascii_case("random") {
                self.shuffle.random_seed = true;
            } else {
                self.shuffle.seed = val.parse().map_err(|_| {
                    BenchError::Configuration(format!("Invalid ANONBENCH_SHUFFLE_SEED: {val}"))
                })?;
                self.shuffle.random_seed = false;
            }
        }

        if let Ok(val) = std::env::var("ANONBENCH_BITWISE_KEY") {
            self.bitwise.key = secret_key(val);
        }

        if let Ok(val) = std::env::var("ANONBENCH_BITWISE_SECONDARY_KEY") {
            self.bitwise.secondary_key = secret_key(val);
        }

        if let Ok(val) = std::env::var("ANONBENCH_BITWISE_ROTATION") {
            self.bitwise.rotation = val.parse().map_err(|_| {
                BenchError::Configuration(format!("Invalid ANONBENCH_BITWISE_ROTATION: {val}"))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("deterministic", AnonymizationMethod::Deterministic)]
    #[test_case("Shuffle", AnonymizationMethod::Shuffle)]
    #[test_case(" BITWISE ", AnonymizationMethod::Bitwise)]
    fn test_method_parse(input: &str, expected: AnonymizationMethod) {
        assert_eq!(input.parse::<AnonymizationMethod>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_method() {
        let err = "rot13".parse::<AnonymizationMethod>().unwrap_err();
        assert!(matches!(err, BenchError::UnknownMethod(ref name) if name == "rot13"));
    }

    #[test]
    fn test_reversibility() {
        assert!(!AnonymizationMethod::Deterministic.is_reversible());
        assert!(AnonymizationMethod::Shuffle.is_reversible());
        assert!(AnonymizationMethod::Bitwise.is_reversible());
    }

    #[test]
    fn test_field_selection() {
        assert!(FieldSelection::from_fields(&[]).includes("anything"));

        let only = FieldSelection::from_fields(&["name".to_string()]);
        assert!(only.includes("name"));
        assert!(!only.includes("age"));
    }

    #[test]
    fn test_default_config_validates() {
        let config = AnonymizationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shuffle.seed, DEFAULT_SHUFFLE_SEED);
        assert_eq!(config.bitwise.rotation, DEFAULT_ROTATION);
    }

    #[test_case(0)]
    #[test_case(64)]
    fn test_rotation_out_of_range(rotation: u32) {
        let mut config = AnonymizationConfig::default();
        config.bitwise.rotation = rotation;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut config = AnonymizationConfig::default();
        config.deterministic.key = secret_key("");
        assert!(config.validate().is_err());

        let mut config = AnonymizationConfig::default();
        config.bitwise.secondary_key = secret_key("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bitwise_default_keys() {
        let config = BitwiseConfig::default();
        assert_eq!(config.key.expose_secret().as_bytes(), b"SecretKey#123");
        assert_eq!(config.secondary_key.expose_secret().as_bytes(), b"SecretKet@987");
    }

    #[test]
    fn test_partial_toml() {
        let config: AnonymizationConfig = toml::from_str(
            r#"
fields = ["name"]

[bitwise]
rotation = 7
"#,
        )
        .unwrap();
        assert_eq!(config.fields, vec!["name".to_string()]);
        assert_eq!(config.bitwise.rotation, 7);
        assert_eq!(config.shuffle.seed, DEFAULT_SHUFFLE_SEED);
    }
}
