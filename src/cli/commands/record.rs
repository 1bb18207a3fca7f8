//! Record command - remember a resolution

use crate::cli::args::RecordArgs;
use crate::error::HistoryResult;
use crate::history::{Coordinate, HistoryEntry, HistoryStore};
use crate::input::{CommandLineParser, InputParser};
use crate::ui::{self, UiContext};

/// Execute the record command
pub async fn execute(args: RecordArgs, store: &HistoryStore) -> HistoryResult<()> {
    let ctx = UiContext::detect();
    let artifact: Coordinate = args.artifact.parse()?;

    if let Err(e) = CommandLineParser.parse(&args.input) {
        ui::step_warn_hint(
            &ctx,
            &format!("Input '{}' does not parse: {}", args.input, e),
            "Searches will never match this entry",
        );
    }

    let stored = store.record(HistoryEntry::new(args.input, artifact, args.classpath));

    // A one-shot process exits right after this, so wait for our own write
    store.flush().await?;

    ui::step_ok_detail(&ctx, "Recorded", &stored.to_string());
    Ok(())
}
