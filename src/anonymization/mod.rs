//! Anonymization module for anonbench
//!
//! This module holds the anonymization engine: three interchangeable
//! strategies behind the [`Anonymizer`] trait and the registry that maps
//! method names to them.
//!
//! # Methods
//!
//! - **Deterministic**: keyed SHA-256 pseudonyms; equal inputs give equal
//!   outputs, one-way
//! - **Shuffle**: seeded per-column permutation; preserves each column's
//!   multiset, reversible with the seed
//! - **Bitwise**: XOR mask plus rotation on the binary form; reversible
//!
//! # Usage
//!
//! ```rust
//! use anonbench::anonymization::{AnonymizationConfig, StrategyRegistry};
//! use anonbench::domain::{Dataset, Record};
//!
//! let registry = StrategyRegistry::new(&AnonymizationConfig::default())?;
//! let dataset = Dataset::from_records(vec![
//!     Record::new().with("name", "Ann"),
//!     Record::new().with("name", "Ann"),
//! ])?;
//!
//! let anonymized = registry.resolve("deterministic")?.anonymize(&dataset)?;
//! assert_eq!(anonymized.records()[0], anonymized.records()[1]);
//! # Ok::<(), anonbench::domain::BenchError>(())
//! ```

pub mod anonymizer;
pub mod config;
pub mod registry;

// Re-export main types
pub use anonymizer::Anonymizer;
pub use config::{AnonymizationConfig, AnonymizationMethod, FieldSelection};
pub use registry::StrategyRegistry;
