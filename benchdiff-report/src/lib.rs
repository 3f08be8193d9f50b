#![warn(missing_docs)]
//! Benchdiff Report
//!
//! Renders the ordered comparison rows into:
//! - a Markdown comment body (significant subset up front, full table in a
//!   collapsible section)
//! - a console table used locally and as the fallback when comment
//!   delivery is not possible

mod console;
mod duration;
mod markdown;

pub use console::render_console;
pub use duration::format_measurement;
pub use markdown::render_comment;
