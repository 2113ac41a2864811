//! Synthetic dataset generation
//!
//! Produces benchmark payloads with a fixed, reproducible shape. The same seed
//! and size always produce the same dataset, so measurements from separate
//! runs are comparable.

use crate::domain::{Dataset, DatasetSize, Record, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f64::consts::TAU;

/// Seed used when none is configured
pub const DEFAULT_GENERATOR_SEED: u64 = 42;

/// Generated columns, in declaration order
pub const COLUMNS: [&str; 6] = [
    "record_id",
    "name",
    "age",
    "credit_card_number",
    "zip_code",
    "blood_sugar",
];

/// Seeded generator of synthetic person records
///
/// | column | type | content |
/// |---|---|---|
/// | `record_id` | identifier | UUID from seeded random bytes |
/// | `name` | text | `Test{i}` |
/// | `age` | integer | uniform in 18..80 |
/// | `credit_card_number` | text | `4532` + `i` padded to 12 digits |
/// | `zip_code` | text | `1234` + last digit of `i` |
/// | `blood_sugar` | float | normal, mean 100, sd 10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetGenerator {
    seed: u64,
}

impl DatasetGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The generator seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate exactly `size` records
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidSize`](crate::domain::BenchError::InvalidSize)
    /// when `size` is negative.
    pub fn generate(&self, size: i64) -> Result<Dataset> {
        let size = DatasetSize::new(size)?;
        self.generate_size(size)
    }

    /// Generate a dataset of an already validated size
    pub fn generate_size(&self, size: DatasetSize) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let records = (0..size.get()).map(|i| person(i, &mut rng)).collect();

        let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
        Dataset::with_columns(columns, records)
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR_SEED)
    }
}

fn person(i: usize, rng: &mut StdRng) -> Record {
    let mut id_bytes = [0u8; 16];
    rng.fill_bytes(&mut id_bytes);

    Record::new()
        .with(
            "record_id",
            uuid::Builder::from_random_bytes(id_bytes).into_uuid(),
        )
        .with("name", format!("Test{i}"))
        .with("age", rng.gen_range(18i64..80))
        .with("credit_card_number", format!("4532{i:012}"))
        .with("zip_code", format!("1234{}", i % 10))
        .with("blood_sugar", normal(rng, 100.0, 10.0))
}

/// Box–Muller sample from N(mean, sd)
fn normal(rng: &mut StdRng, mean: f64, sd: f64) -> f64 {
    // 1 - [0, 1) keeps ln() away from zero
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    mean + sd * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
