//! Background persistence
//!
//! A single writer task owns the history file. Snapshots are applied in the
//! order they were submitted, so the last write to finish is always the
//! last one queued. Each write goes to a temp file that is renamed over the
//! real one, so readers only ever see a complete snapshot.
//!
//! Nothing here blocks the caller and nothing is flushed on drop. If the
//! process exits with writes still queued, they are lost and the next run
//! sees the last snapshot that made it to disk.

use super::codec;
use super::entry::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Command {
    Write(Vec<HistoryEntry>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the writer task
#[derive(Debug, Clone)]
pub struct HistoryWriter {
    /// `None` when there was no runtime to host the task
    tx: Option<mpsc::UnboundedSender<Command>>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(snapshot) => write!(f, "Write({} entries)", snapshot.len()),
            Self::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl HistoryWriter {
    /// Start the writer task on the current tokio runtime.
    ///
    /// Outside a runtime the writer is detached: snapshots are dropped and
    /// history only lives in memory for this process.
    pub fn spawn(path: PathBuf) -> Self {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(
                    "No tokio runtime ({}); history will not be saved to {}",
                    e,
                    path.display()
                );
                return Self { tx: None };
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        handle.spawn(run(path, rx));
        Self { tx: Some(tx) }
    }

    /// Whether snapshots can still reach disk
    pub fn is_running(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queue a snapshot for writing. Never blocks.
    pub fn submit(&self, snapshot: Vec<HistoryEntry>) {
        let Some(tx) = &self.tx else {
            debug!("History writer is detached; dropping history snapshot");
            return;
        };
        if tx.send(Command::Write(snapshot)).is_err() {
            warn!("History writer has stopped; dropping history snapshot");
        }
    }

    /// Wait until every snapshot submitted before this call has been handled
    pub async fn flush(&self) -> HistoryResult<()> {
        let tx = self.tx.as_ref().ok_or(HistoryError::WriterClosed)?;
        let (done_tx, done_rx) = oneshot::channel();
        tx.send(Command::Flush(done_tx))
            .map_err(|_| HistoryError::WriterClosed)?;
        done_rx.await.map_err(|_| HistoryError::WriterClosed)
    }
}

async fn run(path: PathBuf, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(snapshot) => {
                // Best effort: the in-memory history stays authoritative
                if let Err(e) = write_snapshot(&path, &snapshot).await {
                    warn!("Failed to write history file {}: {}", path.display(), e);
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("History writer for {} shut down", path.display());
}

/// Atomically replace the history file with `snapshot`
pub async fn write_snapshot(path: &Path, snapshot: &[HistoryEntry]) -> HistoryResult<()> {
    let content = codec::encode(snapshot)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| HistoryError::io(format!("creating directory {}", parent.display()), e))?;
    }

    let temp_path = path.with_extension("jsonl.tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| HistoryError::io(format!("writing {}", temp_path.display()), e))?;

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| HistoryError::io(format!("replacing {}", path.display()), e))?;

    debug!(
        "Wrote {} history entries to {}",
        snapshot.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::coordinate::Coordinate;
    use tempfile::TempDir;

    fn entry(input: &str) -> HistoryEntry {
        HistoryEntry::new(input, Coordinate::new("g", input, "1.0"), "")
    }

    #[tokio::test]
    async fn writes_are_applied_in_submission_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(codec::HISTORY_FILE);
        let writer = HistoryWriter::spawn(path.clone());

        let mut snapshot = vec![];
        for name in ["a", "b", "c", "d", "e"] {
            snapshot.insert(0, entry(name));
            writer.submit(snapshot.clone());
        }
        writer.flush().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        let decoded = codec::decode(&content, 20);
        assert_eq!(decoded.entries, snapshot);
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache").join(codec::HISTORY_FILE);

        write_snapshot(&path, &[entry("a")]).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn detached_without_runtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(codec::HISTORY_FILE);
        let writer = HistoryWriter::spawn(path.clone());

        assert!(!writer.is_running());
        writer.submit(vec![entry("a")]);
        assert!(!path.exists());

        // Flushing needs an executor; a throwaway runtime is enough
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt.block_on(writer.flush()).unwrap_err();
        assert!(matches!(err, HistoryError::WriterClosed));
    }

    #[tokio::test]
    async fn running_inside_runtime() {
        let dir = TempDir::new().unwrap();
        let writer = HistoryWriter::spawn(dir.path().join(codec::HISTORY_FILE));
        assert!(writer.is_running());
    }

    #[tokio::test]
    async fn failed_write_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let writer = HistoryWriter::spawn(blocker.join(codec::HISTORY_FILE));

        writer.submit(vec![entry("a")]);
        writer.flush().await.unwrap();

        writer.submit(vec![entry("b")]);
        writer.flush().await.unwrap();
    }
}
