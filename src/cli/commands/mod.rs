//! CLI command implementations

pub mod config;
pub mod list;
pub mod path;
pub mod record;
pub mod search;

pub use config::execute as config;
pub use list::execute as list;
pub use path::execute as path;
pub use record::execute as record;
pub use search::execute as search;
