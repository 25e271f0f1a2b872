//! Line command
//!
//! Usage: subway line <add|list|show|update|delete>

use super::print_json;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::info;
use rusqlite::Connection;
use subway_core::{Distance, LineId, LineRequest, LineService, StationId};

#[derive(Debug, Args)]
pub struct LineArgs {
    #[command(subcommand)]
    pub command: LineCommand,
}

#[derive(Debug, Subcommand)]
pub enum LineCommand {
    /// Create a line with its first section
    Add(AddLineArgs),
    /// List all lines with their stations
    List,
    /// Show one line with its stations
    Show { id: LineId },
    /// Replace name and color of a line
    Update {
        id: LineId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
    },
    /// Delete a line and its sections
    Delete { id: LineId },
}

#[derive(Debug, Args)]
pub struct AddLineArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub color: String,
    /// Up terminal station id
    #[arg(long)]
    pub up: StationId,
    /// Down terminal station id
    #[arg(long)]
    pub down: StationId,
    #[arg(long)]
    pub distance: Distance,
}

pub fn execute(conn: &mut Connection, args: LineArgs) -> Result<()> {
    let mut service = LineService::new(conn);
    match args.command {
        LineCommand::Add(add) => {
            let request = LineRequest::new(add.name, add.color, add.up, add.down, add.distance);
            let id = service.save(&request).context("failed to create line")?;
            print_json(&service.find_by_id(id)?)
        }
        LineCommand::List => print_json(&service.find_all()?),
        LineCommand::Show { id } => print_json(&service.find_by_id(id)?),
        LineCommand::Update { id, name, color } => {
            let changed = service
                .update_by_line(id, &LineRequest::rename(name, color))
                .with_context(|| format!("failed to update line {id}"))?;
            info!("event=cli_line_update module=cli status=ok line_id={id} rows_affected={changed}");
            println!("updated {changed} line(s)");
            Ok(())
        }
        LineCommand::Delete { id } => {
            service
                .delete_by_id(id)
                .with_context(|| format!("failed to delete line {id}"))?;
            println!("deleted line {id}");
            Ok(())
        }
    }
}
