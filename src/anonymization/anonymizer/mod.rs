//! Anonymization strategy module
//!
//! Provides the three interchangeable strategies behind the [`Anonymizer`]
//! capability.

pub mod bitwise;
pub mod deterministic;
pub mod shuffle;

use crate::anonymization::config::AnonymizationMethod;
use crate::domain::{BenchError, Dataset, Result};

/// Trait for anonymization strategy implementations
///
/// Implementations are pure: they never mutate the input, keep no state
/// between calls, and return a dataset with the same record count and column
/// set as the input.
pub trait Anonymizer: Send + Sync {
    /// The method this strategy implements
    fn method(&self) -> AnonymizationMethod;

    /// Anonymize a dataset
    fn anonymize(&self, dataset: &Dataset) -> Result<Dataset>;

    /// Reverse [`anonymize`](Self::anonymize)
    ///
    /// One-way methods keep the default, which fails with
    /// [`BenchError::Irreversible`].
    fn deanonymize(&self, _dataset: &Dataset) -> Result<Dataset> {
        Err(BenchError::Irreversible(self.method().to_string()))
    }

    /// Whether [`deanonymize`](Self::deanonymize) is supported
    fn is_reversible(&self) -> bool {
        self.method().is_reversible()
    }
}
