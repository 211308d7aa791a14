//! Text output helpers
//!
//! Compact age strings and aligned plain-text tables, shared by every report.

pub mod age;
pub mod table;

pub use age::{age_since, format_age};
pub use table::render_columns;
