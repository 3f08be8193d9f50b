//! Console Fallback Table
//!
//! Terminal rendering of the full comparison, used for local runs and as
//! the degraded output when the comment cannot be posted (restricted token
//! on a forked contribution).

use benchdiff_core::{format_percentage, ComparisonRow, Estimate};
use chrono::Utc;

use crate::duration::format_measurement;

/// Render the full comparison as an aligned console table.
pub fn render_console(rows: &[ComparisonRow], short_sha: &str) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "Benchmark comparison for {} ({})\n",
        short_sha,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&"=".repeat(72));
    output.push('\n');

    let name_width = rows
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("Test".len()))
        .max()
        .unwrap_or(4);

    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {:>14}  {:>9}  {:>14}\n",
        "Test", "Base", "Changes", "%", "Significant %"
    ));
    output.push_str(&format!("{}\n", "-".repeat(name_width + 59)));

    for row in rows {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {:>14}  {:>9}  {:>14}\n",
            row.name,
            duration_cell(&row.base),
            duration_cell(&row.changes),
            percent_cell(row.percent_diff),
            percent_cell(row.significant_percent_diff),
        ));
    }

    let significant = rows.iter().filter(|r| r.is_significant()).count();
    output.push_str(&format!(
        "\n{} case(s), {} significant\n",
        rows.len(),
        significant
    ));

    output
}

fn duration_cell(estimate: &Option<Estimate>) -> String {
    match estimate {
        Some(estimate) => format_measurement(estimate),
        None => "N/A".to_string(),
    }
}

fn percent_cell(value: Option<f64>) -> String {
    match value {
        Some(value) => format_percentage(value),
        None => "N/A".to_string(),
    }
}
