//! Output formatting for measurement outcomes.
//!
//! Formatting is an observability sink, not semantics: nothing here affects
//! the measurement loop. Two formats are provided:
//! - Terminal: human-readable output with colors
//! - JSON: machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::format_outcome;
