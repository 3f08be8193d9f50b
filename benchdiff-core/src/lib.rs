#![warn(missing_docs)]
//! Benchdiff Core
//!
//! Pure domain logic for comparing a Criterion benchmark suite across two
//! revisions of a codebase:
//! - Build-artifact decoding from cargo's machine-readable output
//! - Case-list parsing and cross-revision catalog merging
//! - `estimates.json` decoding with slope-over-mean statistic preference
//! - Interval-overlap significance testing and comparison rows
//!
//! No process is ever spawned from this crate; everything here is a pure
//! function over captured text or decoded values, which is what makes the
//! comparison pipeline testable without a working tree.

mod artifact;
mod cases;
mod estimate;
mod row;
mod significance;

pub use artifact::{decode_build_line, decode_build_log, Executable, ExecutableKind};
pub use cases::{bin_env, merge_catalogs, parse_case_list, CaseCatalog, MergedCase};
pub use estimate::{Estimate, NANOS_PER_SEC};
pub use row::ComparisonRow;
pub use significance::{
    diff_percentage, format_percentage, significant_diff_percentage, verdict, Verdict,
    SIGNIFICANT_FACTOR,
};

use std::fmt;

/// One of the two compared states of the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// The prior state the candidate is measured against.
    Base,
    /// The candidate state under review.
    Changes,
}

impl Revision {
    /// Baseline identifier under which the benchmark runtime persists this
    /// revision's results.
    pub fn baseline_id(self) -> &'static str {
        match self {
            Revision::Base => "base",
            Revision::Changes => "changes",
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.baseline_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_ids_match_result_store_layout() {
        assert_eq!(Revision::Base.baseline_id(), "base");
        assert_eq!(Revision::Changes.baseline_id(), "changes");
        assert_eq!(Revision::Changes.to_string(), "changes");
    }
}
