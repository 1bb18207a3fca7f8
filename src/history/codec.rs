//! Durable history file format
//!
//! Version 1 is JSON Lines, one object per line, oldest entry first:
//!
//! ```text
//! {"user input":"com.example:app","last run time":"2024-05-01T09:30:00Z","resolved artifact":"com.example:app:1.2","classpath":"/repo/app-1.2.jar"}
//! ```
//!
//! The version lives in the file name, so a future format just uses a new
//! file and old ones are ignored rather than migrated.

use super::coordinate::Coordinate;
use super::entry::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// History file name, version 1
pub const HISTORY_FILE: &str = "history.1.jsonl";

/// On-disk shape of one entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(rename = "user input")]
    pub user_input: String,

    #[serde(rename = "last run time")]
    pub last_run_time: DateTime<Utc>,

    #[serde(rename = "resolved artifact")]
    pub resolved_artifact: String,

    pub classpath: String,
}

impl From<&HistoryEntry> for StoredEntry {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            user_input: entry.user_input.clone(),
            last_run_time: entry.last_run_time,
            resolved_artifact: entry.resolved_artifact.to_string(),
            classpath: entry.classpath.clone(),
        }
    }
}

impl TryFrom<StoredEntry> for HistoryEntry {
    type Error = HistoryError;

    fn try_from(stored: StoredEntry) -> HistoryResult<Self> {
        let resolved_artifact: Coordinate = stored.resolved_artifact.parse()?;
        Ok(Self {
            user_input: stored.user_input,
            last_run_time: stored.last_run_time,
            resolved_artifact,
            classpath: stored.classpath,
        })
    }
}

/// A line that could not be turned into an entry
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub error: HistoryError,
}

/// Result of decoding a history file
#[derive(Debug, Default)]
pub struct Decoded {
    /// Newest first
    pub entries: Vec<HistoryEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// Decode a single line
pub fn decode_line(line: &str) -> HistoryResult<HistoryEntry> {
    let stored: StoredEntry = serde_json::from_str(line)?;
    HistoryEntry::try_from(stored)
}

/// Decode a whole file, keeping the newest `max_entries` valid entries.
///
/// The file is oldest first, so lines are read from the end and reading
/// stops as soon as `max_entries` have been collected. The returned entries
/// are newest first; skipped lines are reported in file order.
pub fn decode(content: &str, max_entries: usize) -> Decoded {
    let mut decoded = Decoded::default();
    let lines: Vec<&str> = content.lines().collect();

    for (idx, line) in lines.iter().enumerate().rev() {
        if decoded.entries.len() >= max_entries {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(entry) => decoded.entries.push(entry),
            Err(error) => decoded.skipped.push(SkippedLine {
                line: idx + 1,
                error,
            }),
        }
    }

    decoded.skipped.reverse();
    decoded
}

/// Encode a newest-first snapshot, writing it oldest first
pub fn encode(snapshot: &[HistoryEntry]) -> HistoryResult<String> {
    let mut out = String::new();
    for entry in snapshot.iter().rev() {
        out.push_str(&serde_json::to_string(&StoredEntry::from(entry))?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry(input: &str, artifact: &str, minutes_ago: i64) -> HistoryEntry {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        HistoryEntry {
            user_input: input.to_string(),
            last_run_time: base - Duration::minutes(minutes_ago),
            resolved_artifact: artifact.parse().unwrap(),
            classpath: format!("/repo/{}.jar", input),
        }
    }

    #[test]
    fn writes_oldest_first_with_named_keys() {
        let snapshot = vec![entry("new", "g:new:2.0", 0), entry("old", "g:old:1.0", 10)];
        let text = encode(&snapshot).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"user input\":\"old\""));
        assert!(lines[1].contains("\"user input\":\"new\""));
        assert!(lines[0].contains("\"last run time\":\"2024-05-01T11:50:00Z\""));
        assert!(lines[0].contains("\"resolved artifact\":\"g:old:1.0\""));
        assert!(lines[0].contains("\"classpath\":\"/repo/old.jar\""));
    }

    #[test]
    fn decode_restores_newest_first() {
        let snapshot = vec![
            entry("c", "g:c:3.0", 0),
            entry("b", "g:b:2.0", 5),
            entry("a", "g:a:1.0", 10),
        ];
        let decoded = decode(&encode(&snapshot).unwrap(), 20);

        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.entries, snapshot);
    }

    #[test]
    fn skips_malformed_lines_and_keeps_the_rest() {
        let good: Vec<String> = [
            entry("a", "g:a:1.0", 40),
            entry("b", "g:b:1.0", 30),
            entry("c", "g:c:1.0", 20),
            entry("d", "g:d:1.0", 10),
        ]
        .iter()
        .map(|e| serde_json::to_string(&StoredEntry::from(e)).unwrap())
        .collect();

        let content = [
            good[0].as_str(),
            good[1].as_str(),
            r#"{"user input":"broken","last run time":"2024-05-01T12:00:00Z","classpath":""}"#,
            good[2].as_str(),
            good[3].as_str(),
        ]
        .join("\n");

        let decoded = decode(&content, 20);
        let inputs: Vec<&str> = decoded.entries.iter().map(|e| e.user_input.as_str()).collect();

        assert_eq!(inputs, vec!["d", "c", "b", "a"]);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].line, 3);
    }

    #[test]
    fn rejects_bad_timestamp_and_bad_coordinate() {
        let bad_time = r#"{"user input":"x","last run time":"yesterday","resolved artifact":"g:x:1","classpath":""}"#;
        assert!(matches!(decode_line(bad_time), Err(HistoryError::Json(_))));

        let bad_coord = r#"{"user input":"x","last run time":"2024-05-01T12:00:00Z","resolved artifact":"nonsense","classpath":""}"#;
        assert!(matches!(
            decode_line(bad_coord),
            Err(HistoryError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn stops_after_max_entries() {
        let snapshot = vec![
            entry("c", "g:c:1.0", 0),
            entry("b", "g:b:1.0", 5),
            entry("a", "g:a:1.0", 10),
        ];
        let decoded = decode(&encode(&snapshot).unwrap(), 2);
        let inputs: Vec<&str> = decoded.entries.iter().map(|e| e.user_input.as_str()).collect();

        // The oldest line on disk is the one dropped
        assert_eq!(inputs, vec!["c", "b"]);
    }

    #[test]
    fn reports_skipped_lines_in_file_order() {
        let good = encode(&[entry("a", "g:a:1.0", 0)]).unwrap();
        let content = format!("garbage one\n{}garbage two\n", good);

        let decoded = decode(&content, 20);
        let lines: Vec<usize> = decoded.skipped.iter().map(|s| s.line).collect();

        assert_eq!(decoded.entries.len(), 1);
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn ignores_blank_lines_and_garbage() {
        let decoded = decode("\n\nnot json at all\n", 20);
        assert!(decoded.entries.is_empty());
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].line, 3);
    }
}
