//! Path command - show where the history file lives

use crate::history::HISTORY_FILE;
use std::path::Path;

/// Execute the path command
pub fn execute(history_dir: &Path) {
    println!("{}", history_dir.join(HISTORY_FILE).display());
}
