//! Comparison Rows
//!
//! One immutable row per merged case, carrying the two optional estimates
//! and the derived diff numbers. Rows are built in catalog order, so a
//! row vector built from a merged catalog is already sorted by case name.

use crate::estimate::Estimate;
use crate::significance::{self, Verdict};

/// Derived comparison result for one case across both revisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Case name.
    pub name: String,
    /// Estimate under the base revision, absent if it never ran or failed.
    pub base: Option<Estimate>,
    /// Estimate under the changes revision, absent likewise.
    pub changes: Option<Estimate>,
    /// Point-estimate percent difference; absent unless both sides exist.
    pub percent_diff: Option<f64>,
    /// Conservative-edge percent difference; absent unless both sides exist.
    pub significant_percent_diff: Option<f64>,
    /// Interval-overlap verdict for this row.
    pub verdict: Verdict,
}

impl ComparisonRow {
    /// Derive a row from a case's two optional estimates.
    ///
    /// A row with either side absent has no diffs and is never significant.
    pub fn compute(name: impl Into<String>, base: Option<Estimate>, changes: Option<Estimate>) -> Self {
        let (percent_diff, significant_percent_diff, verdict) = match (&base, &changes) {
            (Some(base), Some(changes)) => (
                Some(significance::diff_percentage(changes.seconds, base.seconds)),
                Some(significance::significant_diff_percentage(changes, base)),
                significance::verdict(changes, base),
            ),
            _ => (None, None, Verdict::NotSignificant),
        };

        ComparisonRow {
            name: name.into(),
            base,
            changes,
            percent_diff,
            significant_percent_diff,
            verdict,
        }
    }

    /// Whether this row passes the significance test.
    pub fn is_significant(&self) -> bool {
        self.verdict.is_significant()
    }
}
