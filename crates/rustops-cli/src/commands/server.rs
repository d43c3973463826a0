//! Server search and active server commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::types::ServerSummary;
use rustops_service::AppServices;

use crate::output::{self, OutputFormat};

/// Arguments for server commands
#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Server subcommand
    #[command(subcommand)]
    pub command: ServerCommand,
}

/// Server subcommands
#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Search servers by name
    Find {
        /// Server name or part of it
        query: String,
    },
    /// Set the server every check runs against
    Set {
        /// Server name to search for
        query: Option<String>,
        /// Directory server ID (skips the search)
        #[arg(long, requires = "name")]
        id: Option<String>,
        /// Display name stored with --id
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the active server
    Show,
    /// Clear the active server
    Clear,
}

/// Server display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct ServerRow {
    /// Position in search order
    #[tabled(rename = "#")]
    pub position: usize,
    /// Directory server ID
    pub id: String,
    /// Server name
    pub name: String,
}

impl ServerRow {
    /// Rows for servers in search order.
    pub fn from_servers(servers: &[ServerSummary]) -> Vec<Self> {
        servers
            .iter()
            .enumerate()
            .map(|(index, s)| Self {
                position: index + 1,
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect()
    }
}

/// Execute server commands
pub async fn execute(args: &ServerArgs, services: &AppServices, format: OutputFormat) -> AppResult<()> {
    let servers = &services.servers;

    match &args.command {
        ServerCommand::Find { query } => {
            let found = servers.find_servers(query).await?;
            output::print_list(&ServerRow::from_servers(&found), format);
        }
        ServerCommand::Set { query, id, name } => {
            let (server_id, server_name) = match (id, name, query) {
                (Some(id), Some(name), _) => (id.clone(), name.clone()),
                (_, _, Some(query)) => {
                    let found = servers.find_servers(query).await?;
                    let chosen = choose_server(&found, query)?;
                    (chosen.id.clone(), chosen.name.clone())
                }
                _ => {
                    return Err(AppError::invalid_identifier(
                        "Provide a server name, or --id with --name",
                    ));
                }
            };
            let active = servers.set_active_server(&server_id, &server_name).await?;
            output::print_success(&format!(
                "Active server set to {} ({})",
                active.server_name, active.server_id
            ));
        }
        ServerCommand::Show => match servers.active_server().await? {
            Some(active) => match format {
                OutputFormat::Json => output::print_json(&active),
                OutputFormat::Table => {
                    output::print_kv("Server", &active.server_name);
                    output::print_kv("ID", &active.server_id);
                    output::print_kv("Set at", &active.set_at.to_rfc3339());
                }
            },
            None => output::print_warning("No server set. Use `rustops server set <name>`."),
        },
        ServerCommand::Clear => {
            if servers.clear_active_server().await? {
                output::print_success("Active server cleared");
            } else {
                output::print_warning("No server was set");
            }
        }
    }

    Ok(())
}

/// Pick a server from search results, prompting when there are several.
fn choose_server<'a>(found: &'a [ServerSummary], query: &str) -> AppResult<&'a ServerSummary> {
    match found {
        [] => Err(AppError::not_found(format!("No servers found matching '{query}'"))),
        [only] => Ok(only),
        many => {
            let labels: Vec<String> = many.iter().map(|s| format!("{} ({})", s.name, s.id)).collect();
            let index = dialoguer::Select::new()
                .with_prompt("Several servers match; pick one")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            many.get(index)
                .ok_or_else(|| AppError::internal("Selection out of range"))
        }
    }
}
