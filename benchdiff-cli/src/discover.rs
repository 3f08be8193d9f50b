//! Benchmark Build Discovery
//!
//! Compiles the benchmark suite of the currently checked-out revision and
//! discovers the executables it produced.
//!
//! Two cargo passes: the first runs visibly so compiler output reaches the
//! user, the second repeats the (now cached) build with
//! `--message-format json` and captured stdout to obtain the artifact
//! records. A failed build is fatal — with no executables there is nothing
//! to compare.

use benchdiff_core::{decode_build_log, Executable};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Options controlling the `cargo bench` invocation.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Restrict the build to one named bench target.
    pub bench_name: Option<String>,
    /// Features to enable.
    pub features: Vec<String>,
    /// Whether default features are enabled.
    pub default_features: bool,
}

impl BuildOptions {
    /// The argument vector shared by both cargo passes.
    pub fn bench_args(&self) -> Vec<String> {
        let mut args = vec!["bench".to_string()];
        if let Some(name) = &self.bench_name {
            args.push("--bench".to_string());
            args.push(name.clone());
        }
        if !self.default_features {
            args.push("--no-default-features".to_string());
        }
        if !self.features.is_empty() {
            args.push("--features".to_string());
            args.push(self.features.join(" "));
        }
        args
    }
}

/// Errors from the build step. All of them abort the comparison.
#[derive(Debug, Error)]
pub enum BuildError {
    /// cargo itself could not be invoked.
    #[error("failed to invoke cargo: {0}")]
    Spawn(#[from] std::io::Error),

    /// The benchmark build exited non-zero.
    #[error("cargo bench --no-run exited with {status}\n{stderr}")]
    BuildFailed {
        /// Exit status of the failed invocation.
        status: ExitStatus,
        /// Captured stderr, empty for the visible pass.
        stderr: String,
    },
}

fn cargo(cwd: Option<&Path>) -> Command {
    let mut command = Command::new("cargo");
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    command
}

/// Compile the current revision's benchmarks and list the produced
/// executables, in build-log emission order.
pub fn compile_benchmarks(options: &BuildOptions) -> Result<Vec<Executable>, BuildError> {
    let args = options.bench_args();

    tracing::info!(args = ?args, "compiling benchmarks");
    let status = cargo(options.cwd.as_deref())
        .args(&args)
        .arg("--no-run")
        .status()?;
    if !status.success() {
        return Err(BuildError::BuildFailed {
            status,
            stderr: String::new(),
        });
    }

    // Cached re-run with machine-readable output; stderr is captured so a
    // surprise failure here still carries its diagnostics.
    let output = cargo(options.cwd.as_deref())
        .args(&args)
        .args(["--no-run", "--message-format", "json"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;
    if !output.status.success() {
        return Err(BuildError::BuildFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let executables = decode_build_log(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!(count = executables.len(), "discovered executables");
    Ok(executables)
}
