//! Run command implementation
//!
//! This module implements the `run` command: it builds the strategy registry
//! from configuration, runs the benchmark on a blocking thread and prints the
//! report.

use crate::anonymization::{AnonymizationMethod, StrategyRegistry};
use crate::cli::exit_code;
use crate::config::AnonbenchConfig;
use crate::core::benchmark::{BenchmarkReport, BenchmarkRunner, RunOptions};
use crate::core::generator::DatasetGenerator;
use crate::domain::BenchError;
use chrono::Utc;
use clap::{Args, ValueEnum};
use std::str::FromStr;
use tokio::sync::watch;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per method
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Shuffle seed given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedArg {
    /// Fixed seed
    Fixed(u64),
    /// Fresh seed from OS entropy
    Random,
}

impl FromStr for SeedArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("random") {
            return Ok(SeedArg::Random);
        }
        s.parse()
            .map(SeedArg::Fixed)
            .map_err(|_| format!("expected an unsigned integer or 'random', got '{s}'"))
    }
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Method to benchmark (repeatable; default: all)
    #[arg(short = 'm', long = "method", value_enum)]
    pub methods: Vec<AnonymizationMethod>,

    /// Dataset sizes to benchmark
    #[arg(short, long, num_args = 1.., allow_negative_numbers = true)]
    pub sizes: Vec<i64>,

    /// Timed repetitions per (method, size)
    #[arg(short, long)]
    pub trials: Option<u32>,

    /// Also time deanonymization for reversible methods
    #[arg(long)]
    pub reverse: bool,

    /// Fail if deanonymization does not restore the generated data
    #[arg(long)]
    pub verify: bool,

    /// Shuffle seed (unsigned integer or "random")
    #[arg(long)]
    pub seed: Option<SeedArg>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config: crate::domain::Result<AnonbenchConfig>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match config {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };
        self.apply_to(&mut config);

        let registry = match StrategyRegistry::new(&config.anonymization) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("❌ Invalid anonymization settings");
                eprintln!("   Error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        let generator = DatasetGenerator::new(config.generator.seed);
        let options = RunOptions {
            trials: config.benchmark.trials,
            measure_reverse: config.benchmark.measure_reverse,
            verify_round_trip: config.benchmark.verify_round_trip,
        };
        let methods: Vec<&'static str> = config.benchmark.methods.iter().map(|m| m.as_str()).collect();
        let sizes = config.benchmark.sizes.clone();
        let shuffle_seed = registry.shuffle_seed();

        let started_at = Utc::now();
        let outcome = tokio::task::spawn_blocking(move || {
            BenchmarkRunner::new(&registry, generator, options)
                .with_shutdown(shutdown_signal)
                .run(&methods, &sizes)
        })
        .await?;
        let finished_at = Utc::now();

        let records = match outcome {
            Ok(records) => records,
            Err(e) => {
                crate::log_error_with_context!(&e, "Benchmark run failed");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let report = BenchmarkReport {
            started_at,
            finished_at,
            generator_seed: generator.seed(),
            shuffle_seed,
            records,
        };

        match self.format {
            OutputFormat::Text => print!("{}", report.summary().render_text()),
            OutputFormat::Json => println!("{}", report.to_json()?),
        }

        Ok(exit_code::SUCCESS)
    }

    /// Command-line values take precedence over the configuration file
    fn apply_to(&self, config: &mut AnonbenchConfig) {
        if !self.methods.is_empty() {
            config.benchmark.methods = self.methods.clone();
        }
        if !self.sizes.is_empty() {
            config.benchmark.sizes = self.sizes.clone();
        }
        if let Some(trials) = self.trials {
            config.benchmark.trials = trials;
        }
        if self.reverse {
            config.benchmark.measure_reverse = true;
        }
        if self.verify {
            config.benchmark.verify_round_trip = true;
        }
        match self.seed {
            Some(SeedArg::Fixed(seed)) => {
                config.anonymization.shuffle.seed = seed;
                config.anonymization.shuffle.random_seed = false;
            }
            Some(SeedArg::Random) => config.anonymization.shuffle.random_seed = true,
            None => {}
        }
    }
}

/// Exit code for a failed run
pub fn exit_code_for(error: &BenchError) -> i32 {
    match error {
        BenchError::Interrupted { .. } => exit_code::INTERRUPTED,
        BenchError::Configuration(_) => exit_code::CONFIG_ERROR,
        _ => exit_code::BENCHMARK_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> RunArgs {
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Run(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&["anonbench", "run"]);
        assert!(args.methods.is_empty());
        assert!(args.sizes.is_empty());
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_parse_full() {
        let args = parse(&[
            "anonbench", "run", "-m", "bitwise", "-m", "shuffle", "-s", "10", "100", "--trials",
            "3", "--reverse", "--verify", "--seed", "99", "--format", "json",
        ]);
        assert_eq!(
            args.methods,
            vec![AnonymizationMethod::Bitwise, AnonymizationMethod::Shuffle]
        );
        assert_eq!(args.sizes, vec![10, 100]);
        assert_eq!(args.trials, Some(3));
        assert!(args.reverse && args.verify);
        assert_eq!(args.seed, Some(SeedArg::Fixed(99)));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_rejects_unknown_method() {
        assert!(Cli::try_parse_from(["anonbench", "run", "-m", "rot13"]).is_err());
    }

    #[test]
    fn test_seed_arg() {
        assert_eq!("random".parse::<SeedArg>(), Ok(SeedArg::Random));
        assert_eq!("RANDOM".parse::<SeedArg>(), Ok(SeedArg::Random));
        assert_eq!("42".parse::<SeedArg>(), Ok(SeedArg::Fixed(42)));
        assert!("-1".parse::<SeedArg>().is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let args = parse(&["anonbench", "run", "-m", "deterministic", "-s", "5", "--seed", "random"]);
        let mut config = AnonbenchConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.benchmark.methods, vec![AnonymizationMethod::Deterministic]);
        assert_eq!(config.benchmark.sizes, vec![5]);
        assert!(config.anonymization.shuffle.random_seed);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&BenchError::Interrupted { completed: 2 }), 130);
        assert_eq!(exit_code_for(&BenchError::InvalidSize { size: -1 }), 3);
        assert_eq!(exit_code_for(&BenchError::Configuration("x".into())), 2);
    }

    #[tokio::test]
    async fn test_execute_small_run() {
        let args = parse(&["anonbench", "run", "-s", "0", "10", "--verify"]);
        let (_tx, rx) = watch::channel(false);
        let code = args.execute(Ok(AnonbenchConfig::default()), rx).await.unwrap();
        assert_eq!(code, exit_code::SUCCESS);
    }

    #[tokio::test]
    async fn test_execute_negative_size() {
        let args = parse(&["anonbench", "run", "-s", "-1"]);
        let (_tx, rx) = watch::channel(false);
        let code = args.execute(Ok(AnonbenchConfig::default()), rx).await.unwrap();
        assert_eq!(code, exit_code::BENCHMARK_ERROR);
    }

    #[tokio::test]
    async fn test_execute_config_error() {
        let args = parse(&["anonbench", "run"]);
        let (_tx, rx) = watch::channel(false);
        let code = args
            .execute(Err(BenchError::Configuration("bad".into())), rx)
            .await
            .unwrap();
        assert_eq!(code, exit_code::CONFIG_ERROR);
    }
}
