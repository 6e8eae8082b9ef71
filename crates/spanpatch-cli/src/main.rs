//! spanpatch CLI
//!
//! Replaces the text between two literal markers in a file.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            span,
            replacement,
            replacement_file,
            body,
            dry_run,
            require_match,
        } => commands::run_apply(
            &span,
            replacement.as_deref(),
            replacement_file.as_deref(),
            body,
            dry_run,
            require_match,
        ),
        Commands::Check { span, json } => commands::run_check(&span, json),
    }
}
