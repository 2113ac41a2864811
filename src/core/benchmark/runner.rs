//! Benchmark runner
//!
//! Runs every requested method against every requested size, strictly in
//! sequence, and times the anonymize call with a monotonic clock.

use super::measurement::Measurement;
use crate::anonymization::{AnonymizationMethod, Anonymizer, StrategyRegistry};
use crate::core::generator::DatasetGenerator;
use crate::domain::{BenchError, Dataset, DatasetSize, Result};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Options for a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Timed repetitions per (method, size); the mean is reported
    pub trials: u32,

    /// Also time deanonymize for reversible methods
    pub measure_reverse: bool,

    /// Check that deanonymize restores the generated dataset
    ///
    /// Implies `measure_reverse`.
    pub verify_round_trip: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            trials: 1,
            measure_reverse: false,
            verify_round_trip: false,
        }
    }
}

impl RunOptions {
    fn reverses(&self) -> bool {
        self.measure_reverse || self.verify_round_trip
    }
}

/// Sequential benchmark driver over a [`StrategyRegistry`]
///
/// # Examples
///
/// ```
/// use anonbench::anonymization::{AnonymizationConfig, StrategyRegistry};
/// use anonbench::core::benchmark::{BenchmarkRunner, RunOptions};
/// use anonbench::core::generator::DatasetGenerator;
///
/// let registry = StrategyRegistry::new(&AnonymizationConfig::default())?;
/// let runner = BenchmarkRunner::new(&registry, DatasetGenerator::default(), RunOptions::default());
///
/// let records = runner.run(&["bitwise", "shuffle"], &[10, 100])?;
/// assert_eq!(records.len(), 4);
/// # Ok::<(), anonbench::domain::BenchError>(())
/// ```
pub struct BenchmarkRunner<'a> {
    registry: &'a StrategyRegistry,
    generator: DatasetGenerator,
    options: RunOptions,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<'a> BenchmarkRunner<'a> {
    /// Create a runner
    pub fn new(
        registry: &'a StrategyRegistry,
        generator: DatasetGenerator,
        options: RunOptions,
    ) -> Self {
        Self {
            registry,
            generator,
            options,
            shutdown: None,
        }
    }

    /// Stop between iterations once `shutdown` turns true
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Run the benchmark
    ///
    /// Methods are de-duplicated in first-occurrence order. Every method name
    /// and size is validated before the first dataset is generated. Records
    /// come back in method-then-size order.
    ///
    /// # Errors
    ///
    /// - [`BenchError::UnknownMethod`] for a name the registry does not know
    /// - [`BenchError::InvalidSize`] for a negative size
    /// - [`BenchError::RoundTripMismatch`] when verification is on and a
    ///   reversible method fails to restore its input
    /// - [`BenchError::Interrupted`] when the shutdown flag is raised
    pub fn run<M: AsRef<str>>(&self, methods: &[M], sizes: &[i64]) -> Result<Vec<Measurement>> {
        let methods = self.resolve_methods(methods)?;
        let sizes = sizes
            .iter()
            .map(|&size| DatasetSize::new(size))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            methods = ?methods.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            sizes = ?sizes.iter().map(|s| s.get()).collect::<Vec<_>>(),
            trials = self.options.trials,
            "Starting benchmark run"
        );

        let started = Instant::now();
        let mut records = Vec::with_capacity(methods.len() * sizes.len());

        for &method in &methods {
            let strategy = self.registry.get(method);
            for &size in &sizes {
                if self.interrupted() {
                    tracing::warn!(completed = records.len(), "Benchmark run interrupted");
                    return Err(BenchError::Interrupted {
                        completed: records.len(),
                    });
                }

                let measurement = self.measure(strategy, size).inspect_err(|e| {
                    tracing::warn!(
                        method = %method,
                        size = size.get(),
                        completed = records.len(),
                        error = %e,
                        "Benchmark run aborted"
                    );
                })?;

                crate::log_measurement!(&measurement);
                records.push(measurement);
            }
        }

        tracing::info!(
            records = records.len(),
            duration_secs = started.elapsed().as_secs_f64(),
            "Benchmark run completed"
        );

        Ok(records)
    }

    fn resolve_methods<M: AsRef<str>>(&self, names: &[M]) -> Result<Vec<AnonymizationMethod>> {
        let mut methods = Vec::with_capacity(names.len());
        for name in names {
            let method = self.registry.resolve(name.as_ref())?.method();
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Ok(methods)
    }

    fn measure(&self, strategy: &dyn Anonymizer, size: DatasetSize) -> Result<Measurement> {
        let dataset = self.generator.generate_size(size)?;
        let trials = self.options.trials.max(1);

        let start = Instant::now();
        let anonymized = strategy.anonymize(&dataset)?;
        let mut forward = start.elapsed();
        for _ in 1..trials {
            let start = Instant::now();
            let out = strategy.anonymize(&dataset)?;
            forward += start.elapsed();
            drop(out);
        }

        let mut measurement =
            Measurement::new(strategy.method(), dataset.len(), forward / trials).with_trials(trials);

        if self.options.reverses() && strategy.is_reversible() {
            let (reverse, restored) = time_reverse(strategy, &anonymized, trials)?;
            if self.options.verify_round_trip {
                verify(strategy.method(), &dataset, &restored)?;
            }
            if self.options.measure_reverse {
                measurement = measurement.with_reverse(reverse);
            }
        }

        Ok(measurement)
    }

    fn interrupted(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

fn time_reverse(
    strategy: &dyn Anonymizer,
    anonymized: &Dataset,
    trials: u32,
) -> Result<(Duration, Dataset)> {
    let trials = trials.max(1);
    let start = Instant::now();
    let restored = strategy.deanonymize(anonymized)?;
    let mut total = start.elapsed();
    for _ in 1..trials {
        let start = Instant::now();
        let out = strategy.deanonymize(anonymized)?;
        total += start.elapsed();
        drop(out);
    }
    Ok((total / trials, restored))
}

fn verify(method: AnonymizationMethod, original: &Dataset, restored: &Dataset) -> Result<()> {
    if original == restored {
        Ok(())
    } else {
        Err(BenchError::RoundTripMismatch {
            method: method.to_string(),
            size: original.len(),
        })
    }
}
