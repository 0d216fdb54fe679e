//! LayerKV CLI
//!
//! Command shell for an in-memory LayerKV store.
//!
//! # Commands
//!
//! - `shell` - Read commands from stdin
//! - `run` - Execute a script file
//!
//! Both accept the same line language: `SET`, `GET`, `DELETE`, `EXISTS`,
//! `BEGIN`, `COMMIT`, `ROLLBACK`, `DEPTH`, `DUMP`, `STATUS`, `QUIT`.

mod command;
mod commands;
mod error;
mod session;

use clap::{Parser, Subcommand};
use session::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Nested-transaction key-value shell.
#[derive(Parser)]
#[command(name = "layerkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Output format for DUMP and STATUS
    #[arg(global = true, short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin
    Shell,

    /// Execute a script file
    Run {
        /// Path to the script
        script: PathBuf,

        /// Stop at the first failing line
        #[arg(long)]
        fail_fast: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Shell => commands::shell::run(cli.format)?,
        Commands::Run { script, fail_fast } => {
            let failures = commands::run::run(&script, cli.format, fail_fast)?;
            if failures > 0 {
                return Err(format!("{failures} line(s) failed").into());
            }
        }
        Commands::Version => {
            println!("layerkv {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
