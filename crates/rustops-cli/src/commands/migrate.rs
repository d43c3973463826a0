//! Database migration management commands.

use clap::{Args, Subcommand};

use rustops_core::config::AppConfig;
use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_database::DatabasePool;
use rustops_database::connection::redact_url;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the roster tables exist
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> AppResult<()> {
    let pool = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            rustops_database::migration::run_migrations(pool.pool())
                .await
                .map(|()| output::print_success("All migrations applied successfully."))
        }
        MigrateCommand::Check => match pool.schema_status().await {
            Ok(status) if status.is_ready() => {
                output::print_success(&format!(
                    "Roster store at {} is migrated",
                    redact_url(&config.database.url)
                ));
                Ok(())
            }
            Ok(status) => {
                for table in &status.missing {
                    output::print_warning(&format!("Missing table: {table}"));
                }
                Err(AppError::configuration(
                    "Roster store is not migrated (run `rustops migrate run`)",
                ))
            }
            Err(e) => Err(e),
        },
    };

    pool.close().await;
    result
}
