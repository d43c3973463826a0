//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod player;
pub mod roster;
pub mod server;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::info;

use rustops_core::config::AppConfig;
use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_database::DatabasePool;
use rustops_database::PgRosterStore;
use rustops_database::repositories::ActiveServerRepository;
use rustops_directory::{BattleMetricsClient, SteamClient};
use rustops_service::{AppServices, Collaborators};

use crate::output::OutputFormat;

/// RustOps: player presence checks for game servers
#[derive(Debug, Parser)]
#[command(name = "rustops", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from config/<env>.toml
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Server search and the active server
    Server(server::ServerArgs),
    /// Single player presence checks
    Player(player::PlayerArgs),
    /// Roster management and roster checks
    Roster(roster::RosterArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Config(args) => config::execute(args, &self.config, config, self.format).await,
            command => {
                let database = open_roster_store(config).await?;
                let services = build_services(config, database.pool().clone())?;
                let result = dispatch(command, &services, self.format).await;
                database.close().await;
                result
            }
        }
    }
}

/// Run a command that works against the presence services.
pub async fn dispatch(
    command: &Commands,
    services: &AppServices,
    format: OutputFormat,
) -> AppResult<()> {
    match command {
        Commands::Server(args) => server::execute(args, services, format).await,
        Commands::Player(args) => player::execute(args, services, format).await,
        Commands::Roster(args) => roster::execute(args, services, format).await,
        Commands::Migrate(_) | Commands::Config(_) => Err(AppError::internal(
            "migrate and config commands do not use the presence services",
        )),
    }
}

/// Helper: connect to the roster store, checking its tables when configured
pub async fn open_roster_store(config: &AppConfig) -> AppResult<DatabasePool> {
    let database = DatabasePool::connect(&config.database).await?;
    if config.database.require_schema {
        if let Err(e) = database.require_schema().await {
            database.close().await;
            return Err(e);
        }
    }
    Ok(database)
}

/// Helper: build the HTTP clients, stores, and services
pub fn build_services(config: &AppConfig, pool: PgPool) -> AppResult<AppServices> {
    let directory = Arc::new(BattleMetricsClient::new(&config.directory)?);
    let identity = Arc::new(SteamClient::new(&config.identity)?);
    let rosters = Arc::new(PgRosterStore::from_pool(pool.clone()));
    let active_server = Arc::new(ActiveServerRepository::new(pool));

    info!(
        directory = %config.directory.base_url,
        identity = %config.identity.base_url,
        concurrency = config.lookup.concurrency,
        "Presence services initialized"
    );

    Ok(AppServices::build(
        Collaborators {
            directory,
            identity,
            rosters,
            active_server,
        },
        &config.directory,
        &config.lookup,
    ))
}
