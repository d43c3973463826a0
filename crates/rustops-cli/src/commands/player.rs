//! Player check commands.

use clap::{Args, Subcommand};

use rustops_core::result::AppResult;
use rustops_entity::resolution::PlayerCheck;
use rustops_service::AppServices;

use crate::output::{self, OutputFormat};

/// Arguments for player commands
#[derive(Debug, Args)]
pub struct PlayerArgs {
    /// Player subcommand
    #[command(subcommand)]
    pub command: PlayerCommand,
}

/// Player subcommands
#[derive(Debug, Subcommand)]
pub enum PlayerCommand {
    /// Check whether a player is on the active server
    Check {
        /// Player name, directory ID, platform ID, or profile URL
        identifier: String,
    },
}

/// Execute player commands
pub async fn execute(args: &PlayerArgs, services: &AppServices, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        PlayerCommand::Check { identifier } => {
            let server = services.servers.require_active_server().await?;
            let check = services
                .players
                .check_player(identifier, &server.server_id)
                .await?;

            match (&check, format) {
                (PlayerCheck::Ambiguous(_), OutputFormat::Table) => {
                    output::print_block(
                        &format!("Multiple players match '{identifier}' on {}", server.server_name),
                        &check.lines(),
                    );
                }
                _ => output::print_lines(&check.lines(), &check, format),
            }
        }
    }

    Ok(())
}
