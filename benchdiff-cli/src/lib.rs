#![warn(missing_docs)]
//! Benchdiff CLI
//!
//! Orchestrates the whole comparison: build and discover both revisions'
//! benchmark executables, stage them out of the live target directory,
//! merge the case catalogs, execute everything under a minimal-switch
//! schedule, read the persisted estimates, and deliver the rendered
//! report to the pull request (or the console when that is not possible).
//!
//! ## Pipeline Overview
//!
//! ```text
//! cargo bench --no-run (changes)      cargo bench --no-run (base)
//!        │                                   │
//!        ▼                                   ▼
//!   discover + stage + list  ──────►  discover + stage + list
//!                    │                       │
//!                    └───────┬───────────────┘
//!                            ▼
//!                     merged case catalog
//!                            │
//!                            ▼
//!                  revision-switch scheduler
//!                            │
//!                            ▼
//!              estimates.json → comparison rows
//!                            │
//!                            ▼
//!               markdown comment / console table
//! ```

mod config;
mod discover;
mod git;
mod github;
mod harness;
mod results;
mod scheduler;
mod stage;

pub use config::{BenchdiffConfig, BuildConfig, ReportConfig};
pub use discover::{compile_benchmarks, BuildError, BuildOptions};
pub use git::{GitCheckout, GitError};
pub use github::{post_comment, DeliveryError, PullRequestContext};
pub use harness::{list_all_cases, list_cases, run_case, HarnessError};
pub use results::{clear_result_store, read_estimate, result_store_root};
pub use scheduler::{run_schedule, RevisionState, Workbench};
pub use stage::stage_executables;

use anyhow::Context;
use benchdiff_core::{bin_env, merge_catalogs, CaseCatalog, ComparisonRow, Executable, Revision};
use benchdiff_report::{render_comment, render_console};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Benchdiff CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "benchdiff")]
#[command(author, version, about = "Compare Criterion benchmarks between two git revisions")]
pub struct Cli {
    /// Git reference of the base revision (defaults to GITHUB_BASE_REF)
    #[arg(long)]
    pub base_ref: Option<String>,

    /// Token used to post the PR comment (defaults to GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Working directory of the compared project
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Restrict the build to one named bench target
    #[arg(long)]
    pub bench_name: Option<String>,

    /// Cargo features to enable (comma or space separated)
    #[arg(long)]
    pub features: Option<String>,

    /// Build with default features disabled
    #[arg(long)]
    pub no_default_features: bool,

    /// Report title used in the comment header
    #[arg(long)]
    pub title: Option<String>,

    /// Do not post a comment when no case changed significantly
    #[arg(long)]
    pub quiet: bool,

    /// Never post a comment; print the comparison locally instead
    #[arg(long)]
    pub silent: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the benchdiff CLI. This is the binary's entry point.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the benchdiff CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("benchdiff=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("benchdiff=info")
            .init();
    }

    // Discover benchdiff.toml configuration (CLI flags override)
    let config = BenchdiffConfig::discover().unwrap_or_default();
    let options = resolve_options(&cli, &config)?;

    let rows = compare(&options)?;
    deliver(&rows, &options)
}

/// Fully resolved run options: CLI over config file over environment.
#[derive(Debug)]
struct RunOptions {
    build: BuildOptions,
    base_ref: String,
    token: Option<String>,
    title: Option<String>,
    quiet: bool,
    silent: bool,
}

fn resolve_options(cli: &Cli, config: &BenchdiffConfig) -> anyhow::Result<RunOptions> {
    let base_ref = cli
        .base_ref
        .clone()
        .or_else(|| std::env::var("GITHUB_BASE_REF").ok().filter(|r| !r.is_empty()))
        .context("no base revision: pass --base-ref or set GITHUB_BASE_REF")?;

    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()));

    let cwd = cli
        .cwd
        .clone()
        .or_else(|| config.build.cwd.as_ref().map(PathBuf::from));

    let features = match &cli.features {
        Some(list) => split_features(list),
        None => config.build.features.clone(),
    };

    // The CLI flag can only disable default features; absent flag defers
    // to the config file.
    let default_features = if cli.no_default_features {
        false
    } else {
        config.build.default_features
    };

    Ok(RunOptions {
        build: BuildOptions {
            cwd,
            bench_name: cli.bench_name.clone().or_else(|| config.build.bench_name.clone()),
            features,
            default_features,
        },
        base_ref,
        token,
        title: cli.title.clone().or_else(|| config.report.title.clone()),
        quiet: cli.quiet || config.report.quiet,
        silent: cli.silent || config.report.silent,
    })
}

fn split_features(list: &str) -> Vec<String> {
    list.split([',', ' '])
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// One revision's discovered suite: its case catalog and the environment
/// exposing its staged plain binaries.
struct RevisionSuite {
    catalog: CaseCatalog,
    env: BTreeMap<String, String>,
}

/// Build, stage, and list the currently checked-out revision.
fn discover_suite(build: &BuildOptions) -> anyhow::Result<RevisionSuite> {
    let executables = compile_benchmarks(build)?;
    let staged = stage_executables(&executables, build.cwd.as_deref())
        .context("failed to stage executables")?;
    let catalog = list_all_cases(&staged, build.cwd.as_deref())?;
    let env = bin_env(&staged);
    Ok(RevisionSuite { catalog, env })
}

/// Run the full comparison, returning one row per merged case in name
/// order.
fn compare(options: &RunOptions) -> anyhow::Result<Vec<ComparisonRow>> {
    let cwd = options.build.cwd.as_deref();
    let git = GitCheckout::new(&options.base_ref, cwd);

    // The run starts on the changes revision.
    let changes = discover_suite(&options.build)?;
    tracing::debug!(cases = changes.catalog.len(), "changes revision listed");

    git.checkout_base()?;
    let base = discover_suite(&options.build)?;
    tracing::debug!(cases = base.catalog.len(), "base revision listed");
    git.checkout_previous()?;

    clear_result_store(cwd).context("failed to clear prior result store")?;

    let cases = merge_catalogs(&base.catalog, &changes.catalog);
    tracing::info!(cases = cases.len(), "benchmarking merged catalog");

    let mut workbench = CargoWorkbench {
        git: &git,
        cwd,
        base_env: &base.env,
        changes_env: &changes.env,
    };
    let switches = run_schedule(&mut workbench, &cases)?;
    tracing::debug!(switches, "schedule complete");

    Ok(cases
        .iter()
        .map(|case| {
            ComparisonRow::compute(
                case.name.clone(),
                read_estimate(cwd, &case.name, Revision::Base),
                read_estimate(cwd, &case.name, Revision::Changes),
            )
        })
        .collect())
}

/// Production workbench: git for switches, harness processes for runs.
struct CargoWorkbench<'a> {
    git: &'a GitCheckout,
    cwd: Option<&'a Path>,
    base_env: &'a BTreeMap<String, String>,
    changes_env: &'a BTreeMap<String, String>,
}

impl Workbench for CargoWorkbench<'_> {
    fn switch(&mut self, revision: Revision) -> anyhow::Result<()> {
        match revision {
            Revision::Base => self.git.checkout_base()?,
            Revision::Changes => self.git.checkout_previous()?,
        }
        Ok(())
    }

    fn run_case(
        &mut self,
        executable: &Executable,
        case: &str,
        revision: Revision,
    ) -> anyhow::Result<()> {
        let env = match revision {
            Revision::Base => self.base_env,
            Revision::Changes => self.changes_env,
        };
        run_case(executable, case, revision, env, self.cwd)?;
        Ok(())
    }
}

/// Deliver the comparison: PR comment when possible, console otherwise.
fn deliver(rows: &[ComparisonRow], options: &RunOptions) -> anyhow::Result<()> {
    let context = PullRequestContext::from_env();
    let short_sha = context
        .as_ref()
        .map(|c| c.short_sha().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let any_significant = rows.iter().any(ComparisonRow::is_significant);

    if options.silent {
        print!("{}", render_console(rows, &short_sha));
        return Ok(());
    }
    if options.quiet && !any_significant {
        tracing::info!("no significant changes; skipping comment");
        print!("{}", render_console(rows, &short_sha));
        return Ok(());
    }

    let markdown = render_comment(rows, &short_sha, options.title.as_deref());

    match (&context, &options.token) {
        (Some(context), Some(token)) => match post_comment(context, token, &markdown) {
            Ok(()) => Ok(()),
            Err(DeliveryError::Unauthorized(status)) => {
                tracing::warn!(%status, "commenting is not possible with this token (fork?)");
                print!("{}", render_console(rows, &short_sha));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "comment delivery failed");
                print!("{}", render_console(rows, &short_sha));
                Ok(())
            }
        },
        _ => {
            tracing::info!("no pull-request context or token; printing locally");
            print!("{}", render_console(rows, &short_sha));
            Ok(())
        }
    }
}
