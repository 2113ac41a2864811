//! Shuffle anonymization strategy
//!
//! Every selected column is permuted independently, which breaks the link
//! between a value and the rest of its record while keeping the column's
//! exact multiset of values.

use super::Anonymizer;
use crate::anonymization::config::{AnonymizationMethod, FieldSelection};
use crate::domain::{Dataset, FieldValue, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Permutation strategy - reassigns column values according to a seeded shuffle
///
/// Permutations depend only on the seed, the record count and the column
/// order, so the strategy can replay them to reverse a shuffle.
pub struct ShuffleStrategy {
    seed: u64,
    fields: FieldSelection,
}

impl ShuffleStrategy {
    /// Create a shuffle strategy with a fixed seed
    pub fn new(seed: u64, fields: FieldSelection) -> Self {
        Self { seed, fields }
    }

    /// Create a shuffle strategy with a seed drawn from OS entropy
    pub fn from_entropy(fields: FieldSelection) -> Self {
        let seed: u64 = rand::random();
        tracing::info!(seed, "Shuffle seed drawn from entropy");
        Self::new(seed, fields)
    }

    /// The permutation seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One bijection on `[0, len)` per selected column, in column order
    fn permutations<'a>(&self, dataset: &'a Dataset) -> Vec<(&'a str, Vec<usize>)> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        dataset
            .columns()
            .iter()
            .filter(|c| self.fields.includes(c))
            .map(|column| {
                let mut perm: Vec<usize> = (0..dataset.len()).collect();
                perm.shuffle(&mut rng);
                (column.as_str(), perm)
            })
            .collect()
    }

    fn apply<F>(&self, dataset: &Dataset, reorder: F) -> Result<Dataset>
    where
        F: Fn(&[usize], Vec<FieldValue>) -> Vec<FieldValue>,
    {
        if dataset.len() <= 1 {
            return Ok(dataset.clone());
        }

        let mut out = dataset.clone();
        for (column, perm) in self.permutations(dataset) {
            let values: Vec<FieldValue> = dataset
                .column(column)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect();
            out.replace_column(column, reorder(&perm, values))?;
        }
        Ok(out)
    }
}

impl Anonymizer for ShuffleStrategy {
    fn method(&self) -> AnonymizationMethod {
        AnonymizationMethod::Shuffle
    }

    fn anonymize(&self, dataset: &Dataset) -> Result<Dataset> {
        // out[i] = in[perm[i]]
        self.apply(dataset, |perm, values| {
            perm.iter().map(|&j| values[j].clone()).collect()
        })
    }

    fn deanonymize(&self, dataset: &Dataset) -> Result<Dataset> {
        // out[perm[i]] = in[i]
        self.apply(dataset, |perm, values| {
            let mut slots: Vec<Option<FieldValue>> = vec![None; values.len()];
            for (value, &target) in values.into_iter().zip(perm) {
                slots[target] = Some(value);
            }
            slots.into_iter().flatten().collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn numbered(n: i64) -> Dataset {
        let records = (0..n)
            .map(|i| {
                Record::new()
                    .with("id", i)
                    .with("name", format!("Test{i}"))
                    .with("score", (i % 7) as f64)
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_multiset_preserved_per_column() {
        let ds = numbered(200);
        let out = ShuffleStrategy::new(7, FieldSelection::All).anonymize(&ds).unwrap();

        assert!(out.same_shape(&ds));
        for column in ds.columns() {
            assert_eq!(out.value_counts(column), ds.value_counts(column));
        }
    }

    #[test]
    fn test_values_actually_move() {
        let ds = numbered(200);
        let out = ShuffleStrategy::new(7, FieldSelection::All).anonymize(&ds).unwrap();
        assert_ne!(out.column("id"), ds.column("id"));
    }

    #[test]
    fn test_columns_permuted_independently() {
        let ds = numbered(200);
        let out = ShuffleStrategy::new(7, FieldSelection::All).anonymize(&ds).unwrap();

        let linked = out
            .records()
            .iter()
            .filter(|r| match (r.get("id"), r.get("name")) {
                (Some(FieldValue::Integer(i)), Some(FieldValue::Text(name))) => {
                    *name == format!("Test{i}")
                }
                _ => false,
            })
            .count();
        assert!(linked < 20, "{linked} records kept their id/name pairing");
    }

    #[test]
    fn test_same_seed_same_output() {
        let ds = numbered(50);
        let a = ShuffleStrategy::new(99, FieldSelection::All).anonymize(&ds).unwrap();
        let b = ShuffleStrategy::new(99, FieldSelection::All).anonymize(&ds).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_output() {
        let ds = numbered(50);
        let a = ShuffleStrategy::new(1, FieldSelection::All).anonymize(&ds).unwrap();
        let b = ShuffleStrategy::new(2, FieldSelection::All).anonymize(&ds).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_small_datasets_unchanged() {
        let strategy = ShuffleStrategy::new(3, FieldSelection::All);
        for n in [0, 1] {
            let ds = numbered(n);
            assert_eq!(strategy.anonymize(&ds).unwrap(), ds);
        }
    }

    #[test]
    fn test_deanonymize_restores_original() {
        let ds = numbered(123);
        let strategy = ShuffleStrategy::new(0xABCD, FieldSelection::All);
        let anonymized = strategy.anonymize(&ds).unwrap();
        assert_eq!(strategy.deanonymize(&anonymized).unwrap(), ds);
    }

    #[test]
    fn test_selection_limits_shuffled_columns() {
        let ds = numbered(100);
        let strategy = ShuffleStrategy::new(5, FieldSelection::from_fields(&["name".to_string()]));
        let out = strategy.anonymize(&ds).unwrap();

        assert_eq!(out.column("id"), ds.column("id"));
        assert_ne!(out.column("name"), ds.column("name"));
        assert_eq!(strategy.deanonymize(&out).unwrap(), ds);
    }

    #[test]
    fn test_entropy_seed_is_replayable() {
        let ds = numbered(30);
        let random = ShuffleStrategy::from_entropy(FieldSelection::All);
        let replay = ShuffleStrategy::new(random.seed(), FieldSelection::All);
        assert_eq!(random.anonymize(&ds).unwrap(), replay.anonymize(&ds).unwrap());
    }

    #[test]
    fn test_input_not_mutated() {
        let ds = numbered(40);
        let before = ds.clone();
        let _ = ShuffleStrategy::new(1, FieldSelection::All).anonymize(&ds).unwrap();
        assert_eq!(ds, before);
    }
}
