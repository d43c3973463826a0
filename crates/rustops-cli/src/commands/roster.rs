//! Roster management and roster check commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::types::RosterMember;
use rustops_entity::roster::AddMemberOutcome;
use rustops_service::AppServices;

use crate::output::{self, OutputFormat};

/// Arguments for roster commands
#[derive(Debug, Args)]
pub struct RosterArgs {
    /// Roster subcommand
    #[command(subcommand)]
    pub command: RosterCommand,
}

/// Roster subcommands
#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// List rosters with their last check
    List,
    /// List the members of a roster
    Members {
        /// Roster name
        roster: String,
    },
    /// Add a player to a roster (the roster is created if needed)
    Add {
        /// Roster name
        roster: String,
        /// Player name, directory ID, platform ID, or profile URL
        identifier: String,
    },
    /// Remove a member from a roster by stored name
    Remove {
        /// Roster name
        roster: String,
        /// Stored member name
        name: String,
    },
    /// Delete a roster and its members
    Delete {
        /// Roster name
        roster: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Rename a roster
    Rename {
        /// Current roster name
        old_name: String,
        /// New roster name
        new_name: String,
    },
    /// Check every member of a roster on the active server
    Check {
        /// Roster name
        roster: String,
    },
}

/// Member display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    /// Stored name
    name: String,
    /// Directory ID
    directory_id: String,
    /// Platform ID
    platform_id: String,
    /// Added at
    added: String,
}

impl From<&RosterMember> for MemberRow {
    fn from(member: &RosterMember) -> Self {
        Self {
            name: member.name.clone(),
            directory_id: member.directory_id.clone().unwrap_or_else(|| "-".to_string()),
            platform_id: member.platform_id.clone().unwrap_or_else(|| "-".to_string()),
            added: member.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute roster commands
pub async fn execute(args: &RosterArgs, services: &AppServices, format: OutputFormat) -> AppResult<()> {
    let rosters = &services.rosters;

    match &args.command {
        RosterCommand::List => {
            let summaries = rosters.list_rosters(Utc::now()).await?;
            if summaries.is_empty() && format == OutputFormat::Table {
                output::print_warning("No rosters have been created");
                return Ok(());
            }
            let lines: Vec<String> = summaries.iter().map(ToString::to_string).collect();
            match format {
                OutputFormat::Table => output::print_block("ROSTERS:", &lines),
                OutputFormat::Json => output::print_json(&summaries),
            }
        }
        RosterCommand::Members { roster } => {
            let members = rosters.list_members(roster).await?;
            let rows: Vec<MemberRow> = members.iter().map(MemberRow::from).collect();
            output::print_list(&rows, format);
        }
        RosterCommand::Add { roster, identifier } => {
            let server = services.servers.require_active_server().await?;
            let outcome = rosters
                .add_member(roster, identifier, &server.server_id)
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&outcome),
                OutputFormat::Table => print_add_outcome(roster, &outcome),
            }
        }
        RosterCommand::Remove { roster, name } => {
            if rosters.remove_member(roster, name).await? {
                output::print_success(&format!("{} removed from {roster}", name.trim()));
            } else {
                return Err(AppError::not_found(format!(
                    "'{}' is not a member of {roster}",
                    name.trim()
                )));
            }
        }
        RosterCommand::Delete { roster, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete roster '{roster}' and all its members?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            if rosters.delete_roster(roster).await? {
                output::print_success(&format!("Roster '{roster}' deleted"));
            } else {
                return Err(AppError::not_found(format!("Roster '{roster}' does not exist")));
            }
        }
        RosterCommand::Rename { old_name, new_name } => {
            if rosters.rename_roster(old_name, new_name).await? {
                output::print_success(&format!("Roster '{old_name}' renamed to '{new_name}'"));
            } else {
                return Err(AppError::not_found(format!("Roster '{old_name}' does not exist")));
            }
        }
        RosterCommand::Check { roster } => {
            let server = services.servers.require_active_server().await?;
            let report = rosters.check_roster(roster, &server.server_id).await?;
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    output::print_block(&report.header(), &report.render_lines());
                    if let Some(err) = &report.snapshot_error {
                        output::print_warning(&format!("Check result was not saved: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_add_outcome(roster: &str, outcome: &AddMemberOutcome) {
    match outcome {
        AddMemberOutcome::Added {
            member,
            alias_applied,
        } => {
            output::print_success(&format!("{} added to {roster}", member.name));
            if *alias_applied {
                output::print_warning(&format!(
                    "Display name contains unprintable characters; stored as {}",
                    member.name
                ));
            }
        }
        AddMemberOutcome::AlreadyMember(member) => {
            output::print_warning(&format!("{} is already a member of {roster}", member.name));
        }
        AddMemberOutcome::Ambiguous(ranked) => {
            let lines: Vec<String> = ranked.iter().map(ToString::to_string).collect();
            output::print_block("Multiple players match; add one by ID:", &lines);
        }
        AddMemberOutcome::NotFound(query) => {
            output::print_warning(&format!("No matching players found for '{query}'"));
        }
    }
}
