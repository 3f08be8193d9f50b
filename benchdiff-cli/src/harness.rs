//! Harness Invocation
//!
//! Talks to a Criterion benchmark harness executable: queries its case
//! list (`--bench --list`) and runs a single case persisting results under
//! a revision-tagged baseline (`--bench <case> --save-baseline <id>
//! --noplot`).
//!
//! Listing failures are fatal — they happen during discovery, before any
//! measurement. Case execution failures are returned to the caller, which
//! recovers by treating that case/revision as having no result.

use benchdiff_core::{parse_case_list, CaseCatalog, Executable, ExecutableKind, Revision};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Errors from harness invocations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The executable could not be spawned at all.
    #[error("failed to invoke {}: {source}", .path.display())]
    Spawn {
        /// Path of the executable.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The `--list` query exited non-zero.
    #[error("{} --bench --list exited with {status}", .path.display())]
    ListFailed {
        /// Path of the executable.
        path: PathBuf,
        /// Exit status of the query.
        status: ExitStatus,
    },

    /// A case run exited non-zero. Recovered by the scheduler.
    #[error("case '{case}' exited with {status}")]
    CaseFailed {
        /// Name of the failed case.
        case: String,
        /// Exit status of the run.
        status: ExitStatus,
    },
}

fn command(executable: &Executable, cwd: Option<&Path>) -> Command {
    let mut command = Command::new(&executable.path);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    command
}

/// Query one harness for its set of case names.
pub fn list_cases(
    executable: &Executable,
    cwd: Option<&Path>,
) -> Result<BTreeSet<String>, HarnessError> {
    let output = command(executable, cwd)
        .args(["--bench", "--list"])
        .output()
        .map_err(|source| HarnessError::Spawn {
            path: executable.path.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(HarnessError::ListFailed {
            path: executable.path.clone(),
            status: output.status,
        });
    }
    Ok(parse_case_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Build one revision's case catalog by listing every bench-kind
/// executable. When harnesses expose the same case name, the later
/// executable in build order wins.
pub fn list_all_cases(
    executables: &[Executable],
    cwd: Option<&Path>,
) -> Result<CaseCatalog, HarnessError> {
    let mut catalog = CaseCatalog::new();
    for executable in executables {
        if executable.kind != ExecutableKind::Bench {
            continue;
        }
        let cases = list_cases(executable, cwd)?;
        tracing::debug!(harness = %executable.name, cases = cases.len(), "listed cases");
        for case in cases {
            catalog.insert(case, executable.clone());
        }
    }
    Ok(catalog)
}

/// Run one case, persisting its results under the revision's baseline
/// identifier. The revision's bin-exe environment is applied so benchmark
/// code finds relocated sibling binaries.
pub fn run_case(
    executable: &Executable,
    case: &str,
    revision: Revision,
    env: &BTreeMap<String, String>,
    cwd: Option<&Path>,
) -> Result<(), HarnessError> {
    let status = command(executable, cwd)
        .args(["--bench", case, "--save-baseline", revision.baseline_id(), "--noplot"])
        .envs(env)
        .status()
        .map_err(|source| HarnessError::Spawn {
            path: executable.path.clone(),
            source,
        })?;
    if !status.success() {
        return Err(HarnessError::CaseFailed {
            case: case.to_string(),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_carries_the_executable_path() {
        let executable = Executable {
            name: "missing".to_string(),
            kind: ExecutableKind::Bench,
            path: PathBuf::from("/nonexistent/benchdiff-test-binary"),
        };
        let err = list_cases(&executable, None).unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
        assert!(err.to_string().contains("benchdiff-test-binary"));
    }

    #[test]
    fn non_bench_executables_are_not_queried() {
        // A bin-kind executable pointing nowhere must not be invoked.
        let executables = vec![Executable {
            name: "helper".to_string(),
            kind: ExecutableKind::Bin,
            path: PathBuf::from("/nonexistent/helper"),
        }];
        let catalog = list_all_cases(&executables, None).unwrap();
        assert!(catalog.is_empty());
    }
}
