//! CLI argument parsing using clap derive

use clap::Parser;

/// blnk - run and create cross-platform shortcut files
///
/// Without flags the given file is opened as a shortcut. Files that
/// turn out not to be shortcuts are opened by their extension instead.
#[derive(Parser, Debug)]
#[command(name = "blnk")]
#[command(author, version, about, long_about = None)]
// -V belongs to --debug, so the version flag is long-form only.
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(long = "version", action = clap::ArgAction::Version, value_parser = clap::value_parser!(bool))]
    pub version: Option<bool>,

    /// Create a shortcut pointing at TARGET instead of running one
    #[arg(short = 's', long = "set-target", conflicts_with = "update")]
    pub set_target: bool,

    /// Refresh the metadata of an existing shortcut
    #[arg(short = 'u', long = "update")]
    pub update: bool,

    /// Mark a created shortcut as wanting a terminal
    #[arg(short = 'c', long = "terminal")]
    pub terminal: bool,

    /// Never prompt; assume yes
    #[arg(short = 'y', long = "non-interactive")]
    pub non_interactive: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output (includes trace-level logging)
    #[arg(short = 'V', long = "debug")]
    pub debug: bool,

    /// Shortcut file to run, or target when creating with -s
    pub target: String,

    /// Shortcut name, required when the target is a plain URL
    pub name: Option<String>,
}
