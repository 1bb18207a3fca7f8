//! Search command - look up a fresh cached resolution

use crate::cli::args::{OutputFormat, SearchArgs};
use crate::error::HistoryResult;
use crate::history::{HistoryStore, StoredEntry};
use crate::ui::{self, UiContext};

/// Execute the search command
pub async fn execute(args: SearchArgs, store: &HistoryStore) -> HistoryResult<()> {
    let found = store.search(&args.package);

    match (args.format, found) {
        (OutputFormat::Table, Some(entry)) => {
            let ctx = UiContext::detect();
            ui::intro(&ctx, &format!("Cached resolution for {}", args.package));
            ui::key_value(&ctx, "input", &entry.user_input);
            ui::key_value(&ctx, "artifact", &entry.resolved_artifact.to_string());
            ui::key_value(&ctx, "last run", &entry.last_run_time.to_rfc3339());
            ui::key_value(
                &ctx,
                "classpath",
                &format!("{} entries", entry.classpath_entries().len()),
            );
        }
        (OutputFormat::Table, None) => {
            let ctx = UiContext::detect();
            ui::step_info(
                &ctx,
                &format!("No fresh resolution for {}", args.package),
            );
        }
        (OutputFormat::Json, found) => {
            let stored = found.as_ref().map(StoredEntry::from);
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        (OutputFormat::Plain, Some(entry)) => println!("{}", entry.resolved_artifact),
        (OutputFormat::Plain, None) => {}
    }

    Ok(())
}
