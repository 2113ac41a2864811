//! Benchmark summary and reporting
//!
//! Groups measurement records by method for display and wraps them with run
//! metadata for machine-readable output.

use super::measurement::Measurement;
use crate::anonymization::AnonymizationMethod;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

/// Measurements grouped by method, in the order methods were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSummary {
    groups: Vec<(AnonymizationMethod, Vec<Measurement>)>,
}

impl BenchmarkSummary {
    /// Group a flat list of measurements
    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        let mut summary = Self::default();
        for m in measurements {
            summary.push(m.clone());
        }
        summary
    }

    /// Add one measurement to its method's group
    pub fn push(&mut self, measurement: Measurement) {
        match self
            .groups
            .iter_mut()
            .find(|(method, _)| *method == measurement.method)
        {
            Some((_, rows)) => rows.push(measurement),
            None => self.groups.push((measurement.method, vec![measurement])),
        }
    }

    /// Methods in first-seen order
    pub fn methods(&self) -> impl Iterator<Item = AnonymizationMethod> + '_ {
        self.groups.iter().map(|(method, _)| *method)
    }

    /// Rows recorded for a method
    pub fn rows(&self, method: AnonymizationMethod) -> &[Measurement] {
        self.groups
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of measurements
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, rows)| rows.len()).sum()
    }

    /// True when nothing was measured
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Human-readable report, one block per method
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (method, rows) in &self.groups {
            let _ = writeln!(out, "\nPerformance Analysis for {} Method:", title(method));
            for row in rows {
                let _ = writeln!(out, "{row}");
            }
        }
        out
    }
}

/// Serializable run report
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Seed the dataset generator used
    pub generator_seed: u64,

    /// Seed the shuffle strategy used
    pub shuffle_seed: u64,

    /// Every measurement, in run order
    pub records: Vec<Measurement>,
}

impl BenchmarkReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Grouped view of the records
    pub fn summary(&self) -> BenchmarkSummary {
        BenchmarkSummary::from_measurements(&self.records)
    }
}

fn title(method: &AnonymizationMethod) -> String {
    let name = method.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
