//! graviton-history - CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use graviton_history::cli::{commands, Cli, Commands};
use graviton_history::config::ConfigManager;
use graviton_history::error::HistoryResult;
use graviton_history::history::HistoryStore;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> HistoryResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config file {}", config_manager.path().display());

    let history_dir = ConfigManager::history_dir(&config, cli.cache_dir.as_deref());
    debug!("Using history directory {}", history_dir.display());

    match cli.command {
        Commands::Path => {
            commands::path(&history_dir);
            Ok(())
        }
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
        Commands::List(args) => {
            let store = HistoryStore::open(&history_dir, config.history_options()).await;
            commands::list(args, &store).await
        }
        Commands::Search(args) => {
            let store = HistoryStore::open(&history_dir, config.history_options()).await;
            commands::search(args, &store).await
        }
        Commands::Record(args) => {
            let store = HistoryStore::open(&history_dir, config.history_options()).await;
            commands::record(args, &store).await
        }
    }
}

/// Logs go to stderr: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, log_format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("graviton_history=warn"),
        1 => EnvFilter::new("graviton_history=info"),
        _ => EnvFilter::new("graviton_history=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
