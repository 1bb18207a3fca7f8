//! The history store
//!
//! Keeps the last `max_size` resolutions, newest first, unique by user
//! input. Every `record` updates memory immediately and hands an immutable
//! snapshot to the [`HistoryWriter`]; `search` is a pure read.

use super::clock::{Clock, SystemClock};
use super::codec::{self, HISTORY_FILE};
use super::entry::HistoryEntry;
use super::writer::HistoryWriter;
use crate::error::HistoryResult;
use crate::input::{CommandLineParser, InputParser};
use chrono::Duration;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default number of entries kept
pub const DEFAULT_MAX_SIZE: usize = 20;

/// Default age after which a cached resolution is ignored
pub fn default_refresh_interval() -> Duration {
    Duration::hours(24)
}

/// Tunables and collaborators for a [`HistoryStore`]
#[derive(Clone)]
pub struct HistoryOptions {
    pub refresh_interval: Duration,
    pub max_size: usize,
    pub clock: Arc<dyn Clock>,
    pub parser: Arc<dyn InputParser>,
}

impl HistoryOptions {
    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn InputParser>) -> Self {
        self.parser = parser;
        self
    }
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            max_size: DEFAULT_MAX_SIZE,
            clock: Arc::new(SystemClock),
            parser: Arc::new(CommandLineParser),
        }
    }
}

impl std::fmt::Debug for HistoryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryOptions")
            .field("refresh_interval", &self.refresh_interval)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

/// Remembers what user input last resolved to
pub struct HistoryStore {
    /// Newest first
    entries: Mutex<Vec<HistoryEntry>>,
    path: PathBuf,
    options: HistoryOptions,
    writer: HistoryWriter,
}

impl HistoryStore {
    /// Open the store with default options
    pub async fn create(storage_dir: impl AsRef<Path>) -> Self {
        Self::open(storage_dir, HistoryOptions::default()).await
    }

    /// Open the store kept in `storage_dir`, loading whatever history is there.
    ///
    /// A missing or unreadable file gives an empty history. The background
    /// writer runs on the current tokio runtime; without one the store
    /// still works but nothing is saved.
    pub async fn open(storage_dir: impl AsRef<Path>, options: HistoryOptions) -> Self {
        let path = storage_dir.as_ref().join(HISTORY_FILE);
        let entries = load(&path, options.max_size).await;
        let writer = HistoryWriter::spawn(path.clone());

        Self {
            entries: Mutex::new(entries),
            path,
            options,
            writer,
        }
    }

    /// Record a successful resolution and return the entry as stored.
    ///
    /// The entry is stamped with the store's clock. An existing entry with
    /// the same user input is replaced and the new one goes to the front.
    /// Persistence happens in the background; failures are only logged.
    pub fn record(&self, entry: HistoryEntry) -> HistoryEntry {
        let stored = HistoryEntry {
            last_run_time: self.options.clock.now(),
            ..entry
        };

        let mut entries = self.lock();

        if let Some(idx) = entries
            .iter()
            .position(|e| e.user_input == stored.user_input)
        {
            let previous = entries.remove(idx);
            debug!("Replacing previous history entry {}", previous);
        }

        info!("Recording history entry: {}", stored);
        entries.insert(0, stored.clone());

        if entries.len() > self.options.max_size {
            if let Some(removed) = entries.pop() {
                info!(
                    "Forgetting old history entry {} because we have more than {} entries",
                    removed, self.options.max_size
                );
            }
        }

        // Queued while still locked so write order matches record order
        self.writer.submit(entries.clone());

        stored
    }

    /// Find the most recent fresh entry whose input names `package`.
    ///
    /// Each stored input is re-parsed and its package identity compared to
    /// `package`. Inputs that no longer parse are skipped. A match older
    /// than the refresh interval counts as not found but stays in history.
    pub fn search(&self, package: &str) -> Option<HistoryEntry> {
        info!(
            "Searching for a cached resolution in our history list for '{}'",
            package
        );

        let found = self
            .lock()
            .iter()
            .find(|e| self.names_package(e, package))
            .cloned()?;

        let age = (self.options.clock.now() - found.last_run_time).abs();
        if age > self.options.refresh_interval {
            info!(
                "Found a history entry match for {} but it's too old ({} secs)",
                package,
                age.num_seconds()
            );
            return None;
        }

        Some(found)
    }

    /// Copy of the current history, newest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Location of the history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_size(&self) -> usize {
        self.options.max_size
    }

    pub fn refresh_interval(&self) -> Duration {
        self.options.refresh_interval
    }

    /// Wait for every write queued so far to reach disk (or fail).
    ///
    /// The store never does this on its own.
    pub async fn flush(&self) -> HistoryResult<()> {
        self.writer.flush().await
    }

    fn names_package(&self, entry: &HistoryEntry, package: &str) -> bool {
        match self.options.parser.parse(&entry.user_input) {
            Ok(request) => request.package == package,
            Err(e) => {
                debug!(
                    "Ignoring history entry '{}' during search: {}",
                    entry.user_input, e
                );
                false
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        // Every critical section leaves the list consistent, so poisoning is harmless
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("path", &self.path)
            .field("entries", &self.len())
            .field("options", &self.options)
            .finish()
    }
}

async fn load(path: &Path, max_size: usize) -> Vec<HistoryEntry> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No history file at {}, starting fresh", path.display());
            return vec![];
        }
        Err(e) => {
            warn!(
                "Could not read history file {}, starting with empty history: {}",
                path.display(),
                e
            );
            return vec![];
        }
    };

    let decoded = codec::decode(&content, max_size);
    for skipped in &decoded.skipped {
        warn!(
            "Skipping un-parseable history entry at {}:{}: {}",
            path.display(),
            skipped.line,
            skipped.error
        );
    }

    debug!(
        "Loaded {} history entries from {}",
        decoded.entries.len(),
        path.display()
    );
    decoded.entries
}
