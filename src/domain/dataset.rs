//! Dataset and record types
//!
//! A [`Dataset`] is an ordered sequence of [`Record`]s that all share the same
//! field set. The column list is kept separately so the declared field order
//! survives even when the dataset is empty.

use super::errors::BenchError;
use super::result::Result;
use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A single row: field name to scalar value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Returns the value of a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Inserts or replaces a field value
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(field.into(), value)
    }

    /// Field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// (field, value) pairs in sorted field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn field_set(&self) -> BTreeSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }
}

/// Ordered collection of records with a uniform field set
///
/// Deserialization goes through [`Dataset::with_columns`], so the shape
/// invariant holds for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DatasetParts")]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

/// Unchecked wire form of a [`Dataset`]
#[derive(Deserialize)]
struct DatasetParts {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl TryFrom<DatasetParts> for Dataset {
    type Error = BenchError;

    fn try_from(parts: DatasetParts) -> Result<Self> {
        Dataset::with_columns(parts.columns, parts.records)
    }
}

impl Dataset {
    /// Creates a dataset with declared columns and no records
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Builds a dataset from explicit columns and records
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Validation`] if a column is declared twice or a
    /// record's field set differs from the declared columns.
    pub fn with_columns(columns: Vec<String>, records: Vec<Record>) -> Result<Self> {
        let expected: BTreeSet<&str> = columns.iter().map(String::as_str).collect();
        if expected.len() != columns.len() {
            return Err(BenchError::Validation(format!(
                "Duplicate column in {columns:?}"
            )));
        }

        for (index, record) in records.iter().enumerate() {
            if record.field_set() != expected {
                return Err(BenchError::Validation(format!(
                    "Record {index} has fields {:?}, expected {:?}",
                    record.fields().collect::<Vec<_>>(),
                    columns
                )));
            }
        }

        Ok(Self { columns, records })
    }

    /// Builds a dataset taking the column set from the first record
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let columns = records
            .first()
            .map(|r| r.fields().map(str::to_string).collect())
            .unwrap_or_default();
        Self::with_columns(columns, records)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Declared columns in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Values of one column in record order
    pub fn column(&self, name: &str) -> Option<Vec<&FieldValue>> {
        if !self.columns.iter().any(|c| c == name) {
            return None;
        }
        Some(self.records.iter().filter_map(|r| r.get(name)).collect())
    }

    /// Multiset of one column's values
    pub fn value_counts(&self, name: &str) -> HashMap<&FieldValue, usize> {
        let mut counts = HashMap::new();
        for value in self.records.iter().filter_map(|r| r.get(name)) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Whether `other` has the same record count and column set
    pub fn same_shape(&self, other: &Dataset) -> bool {
        self.len() == other.len()
            && self.columns.iter().collect::<BTreeSet<_>>()
                == other.columns.iter().collect::<BTreeSet<_>>()
    }

    /// Returns a new dataset with `transform` applied to every value of the
    /// selected columns; other values are cloned unchanged.
    pub fn map_values<S, F>(&self, mut selected: S, mut transform: F) -> Dataset
    where
        S: FnMut(&str) -> bool,
        F: FnMut(&str, &FieldValue) -> FieldValue,
    {
        let active: Vec<bool> = self.columns.iter().map(|c| selected(c.as_str())).collect();
        if !active.iter().any(|a| *a) {
            return self.clone();
        }

        let records = self
            .records
            .iter()
            .map(|record| {
                let mut out = record.clone();
                for (column, _) in self.columns.iter().zip(&active).filter(|(_, a)| **a) {
                    if let Some(value) = record.get(column) {
                        out.insert(column.clone(), transform(column.as_str(), value));
                    }
                }
                out
            })
            .collect();

        Dataset {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Replaces one column's values in record order
    ///
    /// # Errors
    ///
    /// Fails if the column is unknown or the value count differs from the
    /// record count.
    pub fn replace_column(&mut self, name: &str, values: Vec<FieldValue>) -> Result<()> {
        if !self.columns.iter().any(|c| c == name) {
            return Err(BenchError::Validation(format!("Unknown column: {name}")));
        }
        if values.len() != self.records.len() {
            return Err(BenchError::Validation(format!(
                "Column {name} needs {} values, got {}",
                self.records.len(),
                values.len()
            )));
        }

        for (record, value) in self.records.iter_mut().zip(values) {
            record.insert(name, value);
        }
        Ok(())
    }
}
