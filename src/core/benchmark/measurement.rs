//! Measurement records

use crate::anonymization::AnonymizationMethod;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Timing of one (method, size) iteration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Method that was timed
    pub method: AnonymizationMethod,

    /// Number of records in the generated dataset
    pub size: usize,

    /// Mean wall-clock time of the anonymize call
    #[serde(rename = "anonymize_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,

    /// Mean wall-clock time of the deanonymize call, when measured
    #[serde(
        rename = "deanonymize_secs",
        serialize_with = "as_secs_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub reverse_elapsed: Option<Duration>,

    /// Number of timed repetitions the means are taken over
    pub trials: u32,
}

impl Measurement {
    /// Create a measurement for a single forward timing
    pub fn new(method: AnonymizationMethod, size: usize, elapsed: Duration) -> Self {
        Self {
            method,
            size,
            elapsed,
            reverse_elapsed: None,
            trials: 1,
        }
    }

    /// Set the number of trials
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Attach a deanonymize timing
    pub fn with_reverse(mut self, elapsed: Duration) -> Self {
        self.reverse_elapsed = Some(elapsed);
        self
    }

    /// Anonymize time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Deanonymize time in seconds
    pub fn reverse_secs(&self) -> Option<f64> {
        self.reverse_elapsed.map(|d| d.as_secs_f64())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size: {} -> Anonymization: {:.5}s",
            self.size,
            self.elapsed_secs()
        )?;
        if let Some(reverse) = self.reverse_secs() {
            write!(f, ", Deanonymization: {reverse:.5}s")?;
        }
        Ok(())
    }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

fn as_secs_opt<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_some(&d.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
