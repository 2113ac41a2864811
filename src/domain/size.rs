//! Validated dataset size

use super::errors::BenchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative record count
///
/// Sizes arrive as signed integers from configuration and the command line;
/// converting through this type is the single place negative sizes are
/// rejected.
///
/// # Examples
///
/// ```
/// use anonbench::domain::DatasetSize;
///
/// assert_eq!(DatasetSize::new(10).unwrap().get(), 10);
/// assert!(DatasetSize::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DatasetSize(usize);

impl DatasetSize {
    /// Validates a requested size
    pub fn new(size: i64) -> Result<Self, BenchError> {
        usize::try_from(size)
            .map(Self)
            .map_err(|_| BenchError::InvalidSize { size })
    }

    /// The record count
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for DatasetSize {
    type Error = BenchError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<DatasetSize> for i64 {
    fn from(size: DatasetSize) -> Self {
        size.0 as i64
    }
}

impl From<usize> for DatasetSize {
    fn from(size: usize) -> Self {
        Self(size)
    }
}

impl fmt::Display for DatasetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
