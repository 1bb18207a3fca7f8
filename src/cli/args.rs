//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Graviton history - inspect the resolution-history cache
///
/// Shows and edits the record of what each launcher input last resolved
/// to, the same cache the launcher consults before hitting the network.
#[derive(Parser, Debug)]
#[command(name = "graviton-history")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GRAVITON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the history file
    #[arg(long, global = true, env = "GRAVITON_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List remembered resolutions, newest first
    List(ListArgs),

    /// Look up a fresh cached resolution for a package
    Search(SearchArgs),

    /// Remember a resolution
    Record(RecordArgs),

    /// Show the history file path
    Path,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Package identity, e.g. com.example:app
    pub package: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the record command
#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Exactly what the user typed, flags included
    #[arg(allow_hyphen_values = true)]
    pub input: String,

    /// Resolved coordinate (group:name[:extension[:classifier]]:version)
    #[arg(short, long)]
    pub artifact: String,

    /// Resolved classpath, joined with the OS path-list separator
    #[arg(long, default_value = "")]
    pub classpath: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list-style commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
