//! Configuration loading from benchdiff.toml
//!
//! Benchdiff configuration can be specified in a `benchdiff.toml` file in
//! the project root. The file is discovered by walking up from the current
//! directory; CLI flags override file values. The authentication token is
//! never read from the file — only from the CLI or `GITHUB_TOKEN`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Benchdiff configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchdiffConfig {
    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Build configuration for the benchmark compile step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Restrict the build to one named bench target
    #[serde(default)]
    pub bench_name: Option<String>,
    /// Cargo features to enable
    #[serde(default)]
    pub features: Vec<String>,
    /// Whether default features are enabled
    #[serde(default = "default_true")]
    pub default_features: bool,
    /// Working directory override
    #[serde(default)]
    pub cwd: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            bench_name: None,
            features: Vec::new(),
            default_features: true,
            cwd: None,
        }
    }
}

/// Report and delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Report title used in the comment header
    #[serde(default)]
    pub title: Option<String>,
    /// Skip posting a comment when no row is significant
    #[serde(default)]
    pub quiet: bool,
    /// Never post a comment, always print locally
    #[serde(default)]
    pub silent: bool,
}

fn default_true() -> bool {
    true
}

impl BenchdiffConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("benchdiff.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
