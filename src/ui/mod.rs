//! Console output helpers
//!
//! Interactive terminals get colored, glyph-prefixed lines; pipes and CI get
//! plain `[OK]`-style tags so output stays grep-friendly.

mod context;
mod output;

pub use context::UiContext;
pub use output::{intro, key_value, step_info, step_ok_detail, step_warn_hint};
