//! Resolution history cache
//!
//! Remembers, across runs, what a piece of user input last resolved to so
//! the launcher can skip redundant network work.
//!
//! # Persistence
//!
//! | Concern | Behavior |
//! |---------|----------|
//! | File | `history.1.jsonl` in the storage directory, oldest entry first |
//! | Bad entry | Skipped with a warning, the rest still load |
//! | Bad file | Treated as an empty history |
//! | Writes | Serial background task, atomic replace, never flushed on exit |

pub mod clock;
pub mod codec;
pub mod coordinate;
pub mod entry;
pub mod store;
pub mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{StoredEntry, HISTORY_FILE};
pub use coordinate::Coordinate;
pub use entry::{join_classpath, HistoryEntry};
pub use store::{HistoryOptions, HistoryStore, DEFAULT_MAX_SIZE};
pub use writer::HistoryWriter;
