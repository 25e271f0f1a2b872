//! Station command
//!
//! Usage: subway station <add|list|show|delete>

use super::print_json;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::info;
use rusqlite::Connection;
use subway_core::{StationId, StationRequest, StationService};

#[derive(Debug, Args)]
pub struct StationArgs {
    #[command(subcommand)]
    pub command: StationCommand,
}

#[derive(Debug, Subcommand)]
pub enum StationCommand {
    /// Create a station
    Add {
        /// Station name
        name: String,
    },
    /// List all stations
    List,
    /// Show one station
    Show { id: StationId },
    /// Delete a station no line uses
    Delete { id: StationId },
}

pub fn execute(conn: &mut Connection, args: StationArgs) -> Result<()> {
    let mut service = StationService::new(conn);
    match args.command {
        StationCommand::Add { name } => {
            let created = service
                .create_station(&StationRequest { name })
                .context("failed to create station")?;
            print_json(&created)
        }
        StationCommand::List => print_json(&service.find_all()?),
        StationCommand::Show { id } => print_json(&service.find_by_id(id)?),
        StationCommand::Delete { id } => {
            service
                .delete_by_id(id)
                .with_context(|| format!("failed to delete station {id}"))?;
            info!("event=cli_station_delete module=cli status=ok station_id={id}");
            println!("deleted station {id}");
            Ok(())
        }
    }
}
