//! Weekly hydration report.
//!
//! # Modules
//!
//! - `weekly` - Statistics, suggestions and Markdown rendering of the last seven days

mod weekly;

pub use crate::report::weekly::{generate_weekly_report, render_markdown};
