//! Interval-Overlap Significance
//!
//! A difference counts as significant only when the two uncertainty
//! intervals (point estimate ± 2×standard error) do not overlap at all.
//! The informational percent difference always compares point estimates;
//! the significant percent difference compares the conservative,
//! non-overlapping interval edges instead, so the reported delta is a
//! bound the noise cannot explain away.

use crate::estimate::Estimate;

/// Interval widening factor applied to standard errors.
pub const SIGNIFICANT_FACTOR: f64 = 2.0;

/// Outcome of the interval-overlap test for one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The changes interval lies entirely below the base interval.
    Faster,
    /// The base interval lies entirely below the changes interval.
    Slower,
    /// The intervals overlap (touching counts as overlapping).
    NotSignificant,
}

impl Verdict {
    /// Whether this verdict flags the row as significant.
    pub fn is_significant(self) -> bool {
        !matches!(self, Verdict::NotSignificant)
    }
}

fn interval(estimate: &Estimate) -> (f64, f64) {
    (
        estimate.seconds - SIGNIFICANT_FACTOR * estimate.std_err,
        estimate.seconds + SIGNIFICANT_FACTOR * estimate.std_err,
    )
}

/// Classify the changes estimate against the base estimate.
pub fn verdict(changes: &Estimate, base: &Estimate) -> Verdict {
    let (changes_min, changes_max) = interval(changes);
    let (base_min, base_max) = interval(base);
    if changes_max < base_min {
        Verdict::Faster
    } else if base_max < changes_min {
        Verdict::Slower
    } else {
        Verdict::NotSignificant
    }
}

/// Percent difference of `changes` relative to `base`.
pub fn diff_percentage(changes: f64, base: f64) -> f64 {
    (changes / base - 1.0) * 100.0
}

/// Percent difference measured at the non-overlapping interval edges.
///
/// When the changes side is faster this compares its upper edge against
/// the base lower edge; when slower, its lower edge against the base upper
/// edge. Zero when the intervals overlap. The asymmetry is intentional
/// conservatism: the bound reflects the worst plausible reading of the
/// winning side against the best plausible reading of the losing side.
pub fn significant_diff_percentage(changes: &Estimate, base: &Estimate) -> f64 {
    let (changes_min, changes_max) = interval(changes);
    let (base_min, base_max) = interval(base);
    if changes_max < base_min {
        diff_percentage(changes_max, base_min)
    } else if base_max < changes_min {
        diff_percentage(changes_min, base_max)
    } else {
        0.0
    }
}

/// Render a percentage cell. Exact zero renders empty; a positive value
/// carries an explicit sign.
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 {
        return String::new();
    }
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}
