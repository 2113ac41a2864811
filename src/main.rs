// Anonbench - Anonymization Strategy Benchmark
// Copyright (c) 2025 Anonbench Contributors
// Licensed under the MIT License

use anonbench::cli::{exit_code, logging_exit_code, Cli, Commands};
use anonbench::config::LoggingConfig;
use anonbench::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging follows the config file when it loads; commands report load errors themselves
    let config = cli.load_config();
    let (log_level, logging_config) = match &config {
        Ok(c) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| c.application.log_level.clone()),
            c.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };
    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(logging_exit_code(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "anonbench - anonymization strategy benchmark"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), stopping after current measurement...");
                    eprintln!("\n⚠️  Shutdown signal received, finishing current measurement...");
                    let _ = shutdown_tx.send(true);
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, stopping after current measurement...");
                    eprintln!("\n⚠️  Shutdown signal received, finishing current measurement...");
                    let _ = shutdown_tx.send(true);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), stopping after current measurement...");
                eprintln!("\n⚠️  Shutdown signal received, finishing current measurement...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let code = match execute_command(&cli, config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_code::FATAL
        }
    };

    // Flush file logs before exiting
    drop(logging_guard);
    process::exit(code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: anonbench::domain::Result<anonbench::config::AnonbenchConfig>,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(config, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref(), config).await,
        Commands::Init(args) => args.execute().await,
    }
}
