//! Result Store Reading
//!
//! After execution, the benchmark runtime owns a result store at
//! `target/criterion/<case>/<baseline id>/estimates.json`. Missing or
//! unparsable files are the expected shape for a case present in only one
//! revision, or one whose run failed: they decode to an absent estimate,
//! never an error.

use benchdiff_core::{Estimate, Revision};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Root of the revision-tagged result store.
pub fn result_store_root(cwd: Option<&Path>) -> PathBuf {
    cwd.unwrap_or_else(|| Path::new("."))
        .join("target")
        .join("criterion")
}

/// Remove any prior accumulated result store, so stale baselines from a
/// previous run against the same tree cannot leak into this comparison.
pub fn clear_result_store(cwd: Option<&Path>) -> io::Result<()> {
    let root = result_store_root(cwd);
    match fs::remove_dir_all(&root) {
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Read one case's estimate under one revision's baseline.
pub fn read_estimate(cwd: Option<&Path>, case: &str, revision: Revision) -> Option<Estimate> {
    let path = result_store_root(cwd)
        .join(case)
        .join(revision.baseline_id())
        .join("estimates.json");
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(_) => {
            tracing::debug!(case, %revision, "no result file; treating as absent");
            return None;
        }
    };
    let estimate = Estimate::from_json(&json);
    if estimate.is_none() {
        tracing::debug!(case, %revision, "unreadable result file; treating as absent");
    }
    estimate
}
