//! RustOps: player presence checks for game servers.
//!
//! Main entry point that loads configuration, initializes logging, and
//! dispatches the CLI command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use rustops_cli::Cli;
use rustops_core::config::AppConfig;
use rustops_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::error!(kind = %e.kind, "Command failed: {}", e.message);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from the file, the environment overlay, and
/// `RUSTOPS__*` variables.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("RUSTOPS_ENV").ok());

    AppConfig::load(&cli.config, env.as_deref())
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
