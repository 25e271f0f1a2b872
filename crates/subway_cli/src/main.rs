//! `subway` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `subway_core` line/station services.
//! - Print service results as pretty JSON on stdout.
//!
//! Configuration comes from flags with environment fallbacks
//! (`SUBWAY_DB`, `SUBWAY_LOG_DIR`, `SUBWAY_LOG_LEVEL`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "subway")]
#[command(about = "Subway line and station management", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(
        long,
        env = "SUBWAY_DB",
        default_value = subway_core::db::DEFAULT_DB_FILE_NAME,
        global = true
    )]
    db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, env = "SUBWAY_LOG_DIR", global = true)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "SUBWAY_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Health check
    Ping,
    /// Print core version
    Version,
    /// Station operations
    Station(commands::station::StationArgs),
    /// Line operations
    Line(commands::line::LineArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| subway_core::default_log_level());
        subway_core::init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Ping => {
            println!("{}", subway_core::ping());
            Ok(())
        }
        Commands::Version => {
            println!("subway_core version={}", subway_core::core_version());
            Ok(())
        }
        Commands::Station(args) => {
            let mut conn = open(&cli.db)?;
            commands::station::execute(&mut conn, args)
        }
        Commands::Line(args) => {
            let mut conn = open(&cli.db)?;
            commands::line::execute(&mut conn, args)
        }
    }
}

fn open(path: &Path) -> Result<Connection> {
    subway_core::db::open_db(path)
        .with_context(|| format!("failed to open database `{}`", path.display()))
}
