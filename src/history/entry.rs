//! History entries

use super::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// One remembered resolution of a user request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// What the user actually typed, flags included. Lookup key, matched exactly.
    pub user_input: String,

    /// When the user last ran this input
    pub last_run_time: DateTime<Utc>,

    /// What the input fully resolved to last time
    pub resolved_artifact: Coordinate,

    /// Runtime dependency locations, joined with the host path-list separator
    pub classpath: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time.
    ///
    /// [`HistoryStore::record`](super::HistoryStore::record) restamps the
    /// entry with its own clock, so the time set here only matters for
    /// entries that never pass through a store.
    pub fn new(
        user_input: impl Into<String>,
        resolved_artifact: Coordinate,
        classpath: impl Into<String>,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            last_run_time: Utc::now(),
            resolved_artifact,
            classpath: classpath.into(),
        }
    }

    /// Split the classpath into individual locations
    pub fn classpath_entries(&self) -> Vec<PathBuf> {
        if self.classpath.is_empty() {
            return vec![];
        }
        std::env::split_paths(&self.classpath).collect()
    }
}

/// Join locations with the host path-list separator.
///
/// Returns `None` if a location contains the separator itself.
pub fn join_classpath<I, P>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<OsStr>,
{
    let joined: OsString = std::env::join_paths(paths).ok()?;
    Some(joined.to_string_lossy().into_owned())
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} @ {} ({} cp entries)",
            self.user_input,
            self.resolved_artifact,
            self.last_run_time.to_rfc3339(),
            self.classpath_entries().len()
        )
    }
}
