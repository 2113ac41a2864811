//! Strategy registry
//!
//! Maps method names to strategy implementations. The table is built once from
//! configuration and is read-only afterwards; callers share it by reference.

use crate::anonymization::anonymizer::{
    bitwise::BitwiseStrategy, deterministic::DeterministicStrategy, shuffle::ShuffleStrategy,
    Anonymizer,
};
use crate::anonymization::config::{AnonymizationConfig, AnonymizationMethod};
use crate::domain::Result;

/// Read-only lookup from [`AnonymizationMethod`] to its strategy
///
/// # Examples
///
/// ```
/// use anonbench::anonymization::{AnonymizationConfig, StrategyRegistry};
///
/// let registry = StrategyRegistry::new(&AnonymizationConfig::default())?;
/// assert!(registry.resolve("shuffle").is_ok());
/// assert!(registry.resolve("rot13").is_err());
/// # Ok::<(), anonbench::domain::BenchError>(())
/// ```
pub struct StrategyRegistry {
    deterministic: DeterministicStrategy,
    shuffle: ShuffleStrategy,
    bitwise: BitwiseStrategy,
}

impl StrategyRegistry {
    /// Build every strategy from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &AnonymizationConfig) -> Result<Self> {
        config.validate()?;
        let fields = config.field_selection();

        let shuffle = if config.shuffle.random_seed {
            ShuffleStrategy::from_entropy(fields.clone())
        } else {
            ShuffleStrategy::new(config.shuffle.seed, fields.clone())
        };

        let registry = Self {
            deterministic: DeterministicStrategy::new(&config.deterministic.key, fields.clone()),
            bitwise: BitwiseStrategy::new(
                &config.bitwise.key,
                &config.bitwise.secondary_key,
                config.bitwise.rotation,
                fields,
            )?,
            shuffle,
        };

        tracing::debug!(
            fields = ?config.fields,
            shuffle_seed = registry.shuffle.seed(),
            rotation = config.bitwise.rotation,
            "Strategy registry initialized"
        );

        Ok(registry)
    }

    /// The strategy for a method
    pub fn get(&self, method: AnonymizationMethod) -> &dyn Anonymizer {
        match method {
            AnonymizationMethod::Deterministic => &self.deterministic,
            AnonymizationMethod::Shuffle => &self.shuffle,
            AnonymizationMethod::Bitwise => &self.bitwise,
        }
    }

    /// Look a strategy up by name
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnknownMethod`](crate::domain::BenchError::UnknownMethod)
    /// for any name other than `deterministic`, `shuffle` or `bitwise`.
    pub fn resolve(&self, name: &str) -> Result<&dyn Anonymizer> {
        let method: AnonymizationMethod = name.parse()?;
        Ok(self.get(method))
    }

    /// Every registered method
    pub fn methods(&self) -> &'static [AnonymizationMethod] {
        &AnonymizationMethod::ALL
    }

    /// Seed the shuffle strategy uses
    pub fn shuffle_seed(&self) -> u64 {
        self.shuffle.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BenchError;

    fn registry() -> StrategyRegistry {
        StrategyRegistry::new(&AnonymizationConfig::default()).unwrap()
    }

    #[test]
    fn test_every_method_resolves_to_itself() {
        let registry = registry();
        for method in registry.methods() {
            assert_eq!(registry.get(*method).method(), *method);
            assert_eq!(registry.resolve(method.as_str()).unwrap().method(), *method);
        }
    }

    #[test]
    fn test_unknown_name() {
        match registry().resolve("rot13") {
            Err(BenchError::UnknownMethod(name)) => assert_eq!(name, "rot13"),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("rot13 should not resolve"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnonymizationConfig::default();
        config.bitwise.rotation = 99;
        assert!(StrategyRegistry::new(&config).is_err());
    }

    #[test]
    fn test_fixed_seed_from_config() {
        let mut config = AnonymizationConfig::default();
        config.shuffle.seed = 1234;
        assert_eq!(StrategyRegistry::new(&config).unwrap().shuffle_seed(), 1234);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StrategyRegistry>();
    }
}
