//! List command - show remembered resolutions

use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::HistoryResult;
use crate::history::{HistoryEntry, HistoryStore, StoredEntry};
use crate::ui::{self, UiContext};
use chrono::Utc;
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, store: &HistoryStore) -> HistoryResult<()> {
    let entries = store.history();

    if entries.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No history entries");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&entries, store),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[HistoryEntry], store: &HistoryStore) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "History");

    println!(
        "{:<30} {:<40} {:<17} {:<4}",
        style("INPUT").bold(),
        style("ARTIFACT").bold(),
        style("LAST RUN").bold(),
        style("CP").bold()
    );
    println!("{}", "-".repeat(94));

    let now = Utc::now();
    for entry in entries {
        let last_run = entry.last_run_time.format("%Y-%m-%d %H:%M").to_string();
        let last_run = if (now - entry.last_run_time).abs() > store.refresh_interval() {
            style(last_run).dim()
        } else {
            style(last_run).green()
        };

        println!(
            "{:<30} {:<40} {:<17} {:<4}",
            entry.user_input,
            entry.resolved_artifact.to_string(),
            last_run,
            entry.classpath_entries().len()
        );
    }

    println!();
    println!("{} of {} entries", entries.len(), store.max_size());
}

fn print_json(entries: &[HistoryEntry]) -> HistoryResult<()> {
    let stored: Vec<StoredEntry> = entries.iter().map(StoredEntry::from).collect();
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

fn print_plain(entries: &[HistoryEntry]) {
    for entry in entries {
        println!("{}\t{}", entry.user_input, entry.resolved_artifact);
    }
}
