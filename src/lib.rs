//! Graviton history - resolution-history cache
//!
//! Remembers what each piece of launcher input last resolved to, serves
//! that resolution back while it is fresh, and persists itself in the
//! background without blocking the caller.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod ui;

pub use error::{HistoryError, HistoryResult};
pub use history::{Coordinate, HistoryEntry, HistoryOptions, HistoryStore};
