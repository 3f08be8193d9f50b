//! Comment Delivery
//!
//! Posts the rendered Markdown to the pull request's comment thread. The
//! CI context (repository slug, commit sha, PR number) is read from the
//! standard GitHub Actions environment.
//!
//! A restricted token — the usual shape on forked contributions — cannot
//! comment; that surfaces as 401/403/404 and callers degrade to local
//! console output instead of failing the run.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::env;
use thiserror::Error;

/// Pull-request coordinates derived from the CI environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// `owner/repo` slug.
    pub repository: String,
    /// Pull request number targeted by this run.
    pub pr_number: u64,
    /// Commit sha of the measured revision.
    pub sha: String,
}

impl PullRequestContext {
    /// Read the GitHub Actions environment. `None` outside CI or outside
    /// a pull-request run.
    pub fn from_env() -> Option<Self> {
        let repository = env::var("GITHUB_REPOSITORY").ok()?;
        let sha = env::var("GITHUB_SHA").ok()?;
        let pr_number = pr_number_from_ref(&env::var("GITHUB_REF").ok()?)?;
        Some(Self {
            repository,
            pr_number,
            sha,
        })
    }

    /// First seven characters of the measured commit sha.
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(7);
        &self.sha[..end]
    }
}

/// Parse the PR number out of a `refs/pull/<n>/merge` reference.
fn pr_number_from_ref(git_ref: &str) -> Option<u64> {
    let rest = git_ref.strip_prefix("refs/pull/")?;
    rest.split('/').next()?.parse().ok()
}

/// Errors from comment delivery. All of them are recovered by falling
/// back to console output.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The token cannot comment on this repository (fork-restricted).
    #[error("token is not authorized to comment (HTTP {0})")]
    Unauthorized(StatusCode),

    /// The API rejected the request for some other reason.
    #[error("comment API returned HTTP {0}")]
    Status(StatusCode),

    /// Transport-level failure.
    #[error("comment request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Post the comment body to the pull request.
pub fn post_comment(
    context: &PullRequestContext,
    token: &str,
    body: &str,
) -> Result<(), DeliveryError> {
    let url = format!(
        "https://api.github.com/repos/{}/issues/{}/comments",
        context.repository, context.pr_number
    );

    let response = Client::builder()
        .user_agent(concat!("benchdiff/", env!("CARGO_PKG_VERSION")))
        .build()?
        .post(url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .json(&serde_json::json!({ "body": body }))
        .send()?;

    match response.status() {
        status if status.is_success() => {
            tracing::info!(pr = context.pr_number, "posted comparison comment");
            Ok(())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            Err(DeliveryError::Unauthorized(response.status()))
        }
        status => Err(DeliveryError::Status(status)),
    }
}
