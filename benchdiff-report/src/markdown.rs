//! Markdown Comment Rendering
//!
//! Builds the pull-request comment body: the significant subset is the
//! visible part, the full table sits inside a collapsible section so the
//! comment stays short on large suites. When nothing is significant the
//! subset is omitted entirely and only the collapsible full table remains.

use benchdiff_core::{format_percentage, ComparisonRow, Verdict};

use crate::duration::format_measurement;

const TABLE_HEADER: &str = "| Test | Base | PR | % | Significant % |\n\
                            |------|------|----|----|---------------|";

/// Render the full Markdown comment body.
///
/// `short_sha` identifies the measured commit; `title` is the optional
/// configured report title (defaults to "Benchmark").
pub fn render_comment(rows: &[ComparisonRow], short_sha: &str, title: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "## {} for {}\n\n",
        title.unwrap_or("Benchmark"),
        short_sha
    ));

    let significant: Vec<&ComparisonRow> = rows.iter().filter(|r| r.is_significant()).collect();
    if !significant.is_empty() {
        body.push_str("### Significant changes\n\n");
        body.push_str(TABLE_HEADER);
        body.push('\n');
        for row in &significant {
            body.push_str(&render_row(row));
            body.push('\n');
        }
        body.push('\n');
    }

    body.push_str("<details>\n<summary>Full benchmark results</summary>\n\n");
    body.push_str(TABLE_HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(&render_row(row));
        body.push('\n');
    }
    body.push_str("\n</details>\n");

    body
}

fn render_row(row: &ComparisonRow) -> String {
    let name = row.name.replace('|', "\\|");
    let base = cell(row, Side::Base);
    let changes = cell(row, Side::Changes);
    let percent = row
        .percent_diff
        .map(format_percentage)
        .unwrap_or_else(|| "N/A".to_string());
    let significant = row
        .significant_percent_diff
        .map(format_percentage)
        .unwrap_or_else(|| "N/A".to_string());
    format!("| {name} | {base} | {changes} | {percent} | {significant} |")
}

enum Side {
    Base,
    Changes,
}

/// Render one duration cell, bolding the faster side of a significant row.
fn cell(row: &ComparisonRow, side: Side) -> String {
    let (estimate, bold) = match side {
        Side::Base => (&row.base, row.verdict == Verdict::Slower),
        Side::Changes => (&row.changes, row.verdict == Verdict::Faster),
    };
    match estimate {
        None => "N/A".to_string(),
        Some(estimate) => {
            let rendered = format_measurement(estimate);
            if bold {
                format!("**{rendered}**")
            } else {
                rendered
            }
        }
    }
}
