//! Case Catalogs
//!
//! Parses the case list a benchmark harness prints in `--list` mode, and
//! merges the per-revision case→executable catalogs into a single ordered
//! catalog where each case may be present in either or both revisions.
//!
//! Ordering is lexicographic by case name throughout (`BTreeMap`), which is
//! what makes the final report deterministic regardless of execution order.

use crate::artifact::{Executable, ExecutableKind};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from case name to the executable containing it, for one revision.
pub type CaseCatalog = BTreeMap<String, Executable>;

/// One case name merged across both revisions.
///
/// A case missing from one revision is representable and still produces a
/// reportable row; it is never dropped. The same name may map to different
/// executables per revision — both are retained, not reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCase {
    /// Case name, unique within the merged catalog.
    pub name: String,
    /// Executable containing this case in the base revision, if any.
    pub base: Option<Executable>,
    /// Executable containing this case in the changes revision, if any.
    pub changes: Option<Executable>,
}

/// Extract the set of case names from a harness's `--list` stdout.
///
/// Lines have the form `<name>: bench`; a trailing carriage return is
/// tolerated. A harness may register the same case more than once, so the
/// result is a set. Zero cases is valid.
pub fn parse_case_list(stdout: &str) -> BTreeSet<String> {
    let pattern = Regex::new(r"^(.+): bench\r?$").expect("case list pattern is valid");
    stdout
        .lines()
        .filter_map(|line| pattern.captures(line))
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Merge the two per-revision catalogs into one ordered case list.
///
/// The result is the union of both key sets, sorted by name.
pub fn merge_catalogs(base: &CaseCatalog, changes: &CaseCatalog) -> Vec<MergedCase> {
    let names: BTreeSet<&String> = base.keys().chain(changes.keys()).collect();
    names
        .into_iter()
        .map(|name| MergedCase {
            name: name.clone(),
            base: base.get(name).cloned(),
            changes: changes.get(name).cloned(),
        })
        .collect()
}

/// Derive the environment map exposing every plain binary under
/// `CARGO_BIN_EXE_<name>`.
///
/// Benchmark code locates sibling binaries through these variables rather
/// than hard-coded paths, which matters because relocation changes paths.
pub fn bin_env(executables: &[Executable]) -> BTreeMap<String, String> {
    executables
        .iter()
        .filter(|exe| exe.kind == ExecutableKind::Bin)
        .map(|exe| {
            (
                format!("CARGO_BIN_EXE_{}", exe.name),
                exe.path.display().to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn exe(name: &str, kind: ExecutableKind, path: &str) -> Executable {
        Executable {
            name: name.to_string(),
            kind,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn parses_case_lines_and_ignores_noise() {
        let stdout = "parse small: bench\nBenchmarking banner\nparse large: bench\n\n";
        let cases = parse_case_list(stdout);
        assert_eq!(
            cases.into_iter().collect::<Vec<_>>(),
            vec!["parse large".to_string(), "parse small".to_string()]
        );
    }

    #[test]
    fn tolerates_trailing_carriage_return() {
        let cases = parse_case_list("windows case: bench\r\n");
        assert!(cases.contains("windows case"));
    }

    #[test]
    fn deduplicates_repeated_registrations() {
        let cases = parse_case_list("same: bench\nsame: bench\n");
        assert_eq!(cases.len(), 1);
    }

    #[test]
    fn empty_listing_is_valid() {
        assert!(parse_case_list("").is_empty());
    }

    #[test]
    fn merge_is_union_sorted_by_name() {
        let mut base = CaseCatalog::new();
        base.insert("c".into(), exe("h", ExecutableKind::Bench, "/base/h"));
        base.insert("a".into(), exe("h", ExecutableKind::Bench, "/base/h"));
        let mut changes = CaseCatalog::new();
        changes.insert("b".into(), exe("h", ExecutableKind::Bench, "/changes/h"));
        changes.insert("a".into(), exe("h2", ExecutableKind::Bench, "/changes/h2"));

        let merged = merge_catalogs(&base, &changes);
        let names: Vec<_> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        // "a" exists in both revisions, under different executables.
        assert_eq!(merged[0].base.as_ref().unwrap().path, PathBuf::from("/base/h"));
        assert_eq!(
            merged[0].changes.as_ref().unwrap().path,
            PathBuf::from("/changes/h2")
        );
        // "b" is changes-only, "c" is base-only.
        assert!(merged[1].base.is_none());
        assert!(merged[2].changes.is_none());
    }

    #[test]
    fn merge_is_stable_across_runs() {
        let mut base = CaseCatalog::new();
        base.insert("x".into(), exe("h", ExecutableKind::Bench, "/h"));
        let changes = CaseCatalog::new();
        assert_eq!(
            merge_catalogs(&base, &changes),
            merge_catalogs(&base, &changes)
        );
    }

    #[test]
    fn bin_env_exposes_only_plain_binaries() {
        let executables = vec![
            exe("server", ExecutableKind::Bin, "/staged/server"),
            exe("suite", ExecutableKind::Bench, "/staged/suite"),
        ];
        let env = bin_env(&executables);
        assert_eq!(env.len(), 1);
        assert_eq!(env["CARGO_BIN_EXE_server"], "/staged/server");
    }
}
