//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use rustops_core::config::AppConfig;
use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_database::connection::redact_url;

use crate::output::{self, OutputFormat};

/// Sample configuration written by `config generate`.
const DEFAULT_CONFIG: &str = include_str!("../../../../config/default.toml");

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration (secrets omitted)
    Show,
    /// Validate configuration and required secrets
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => {
                output::print_kv("Database", &redact_url(&config.database.url));
                output::print_kv("Directory", &config.directory.base_url);
                output::print_kv("Directory page size", &config.directory.page_size.to_string());
                output::print_kv(
                    "Candidate cap",
                    &config.directory.candidate_result_cap.to_string(),
                );
                output::print_kv("Identity provider", &config.identity.base_url);
                output::print_kv("Lookup concurrency", &config.lookup.concurrency.to_string());
                output::print_kv(
                    "Call timeout",
                    &format!("{}s", config.lookup.call_timeout_seconds),
                );
                output::print_kv("Log level", &config.logging.level);
            }
        },
        ConfigCommand::Validate => {
            let problems = validate(config);
            if problems.is_empty() {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
            } else {
                for problem in &problems {
                    output::print_error(problem);
                }
                return Err(AppError::configuration(format!(
                    "Configuration '{config_path}' has {} problem(s)",
                    problems.len()
                )));
            }
        }
        ConfigCommand::Generate { output: out_path } => {
            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(out_path, DEFAULT_CONFIG).await?;
            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}

/// List the problems that would stop the presence commands from running.
pub fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if config.database.url.trim().is_empty() {
        problems.push("database.url is empty".to_string());
    }
    if config.directory.token.trim().is_empty() {
        problems.push("directory.token is not set (RUSTOPS__DIRECTORY__TOKEN)".to_string());
    }
    if config.identity.api_key.trim().is_empty() {
        problems.push("identity.api_key is not set (RUSTOPS__IDENTITY__API_KEY)".to_string());
    }
    if config.lookup.concurrency == 0 {
        problems.push("lookup.concurrency must be at least 1".to_string());
    }
    if config.directory.page_size == 0 {
        problems.push("directory.page_size must be at least 1".to_string());
    }
    problems
}
