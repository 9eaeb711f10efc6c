//! blnk CLI
//!
//! Runs, creates, and refreshes blnk shortcut files.

mod cli;
mod commands;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose || cli.debug {
        let level = if cli.debug { Level::TRACE } else { Level::DEBUG };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    if cli.set_target {
        let cwd = std::env::current_dir()?;
        let path = commands::run_create(
            &cwd,
            &cli.target,
            cli.name.as_deref(),
            cli.terminal,
            cli.non_interactive,
        )?;
        println!("{} {}", "created".green().bold(), path.display());
        Ok(0)
    } else if cli.update {
        commands::run_update(Path::new(&cli.target))?;
        println!("{} {}", "updated".green().bold(), cli.target);
        Ok(0)
    } else {
        commands::run_target(Path::new(&cli.target))
    }
}
