//! Revision Switching
//!
//! Switches the working tree between the two compared revisions via
//! `git checkout`. "Back to changes" uses git's previous-checkout
//! shorthand (`git checkout -`), matching how the run started: on the
//! changes revision.
//!
//! Checkout failures are fatal — a half-switched tree invalidates every
//! measurement that follows.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Errors from git invocations.
#[derive(Debug, Error)]
pub enum GitError {
    /// git could not be invoked.
    #[error("failed to invoke git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A checkout exited non-zero.
    #[error("git checkout {reference} exited with {status}: {stderr}")]
    CheckoutFailed {
        /// The reference being checked out.
        reference: String,
        /// Exit status of the checkout.
        status: ExitStatus,
        /// Captured stderr of the checkout.
        stderr: String,
    },
}

/// Handle on the working tree's checkout side effects.
#[derive(Debug, Clone)]
pub struct GitCheckout {
    base_ref: String,
    cwd: Option<PathBuf>,
}

impl GitCheckout {
    /// Create a checkout handle for the given base reference.
    pub fn new(base_ref: impl Into<String>, cwd: Option<&Path>) -> Self {
        Self {
            base_ref: base_ref.into(),
            cwd: cwd.map(Path::to_path_buf),
        }
    }

    fn checkout(&self, reference: &str) -> Result<(), GitError> {
        let mut command = Command::new("git");
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        let output = command.args(["checkout", reference]).output()?;
        if !output.status.success() {
            return Err(GitError::CheckoutFailed {
                reference: reference.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    /// Check out the base revision.
    pub fn checkout_base(&self) -> Result<(), GitError> {
        tracing::info!(reference = %self.base_ref, "checking out base revision");
        self.checkout(&self.base_ref)
    }

    /// Return to the previously checked-out revision (the changes side).
    pub fn checkout_previous(&self) -> Result<(), GitError> {
        tracing::info!("checking out changes revision");
        self.checkout("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_outside_a_repository_fails_with_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCheckout::new("main", Some(dir.path()));
        let err = git.checkout_base().unwrap_err();
        match err {
            GitError::CheckoutFailed { reference, stderr, .. } => {
                assert_eq!(reference, "main");
                assert!(!stderr.is_empty());
            }
            GitError::Spawn(_) => {} // No git on PATH also counts as failure here
        }
    }
}
