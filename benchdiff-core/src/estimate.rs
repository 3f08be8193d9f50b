//! Timing Estimates
//!
//! Decodes the `estimates.json` document the benchmark runtime persists per
//! case and baseline. The document carries one or both of a regression
//! `slope` statistic and a raw `mean`, each as a point estimate plus
//! standard error in nanoseconds.

use serde::Deserialize;

/// Nanoseconds per second, the conversion into the internal unit of truth.
pub const NANOS_PER_SEC: f64 = 1e9;

/// A point estimate of mean execution time plus its uncertainty, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Point estimate of the mean duration.
    pub seconds: f64,
    /// Standard error of the point estimate.
    pub std_err: f64,
}

#[derive(Deserialize)]
struct EstimatesFile {
    slope: Option<Statistic>,
    mean: Option<Statistic>,
}

#[derive(Deserialize)]
struct Statistic {
    point_estimate: f64,
    standard_error: f64,
}

impl Estimate {
    /// Decode an `estimates.json` document.
    ///
    /// The regression slope is preferred over the raw mean when both are
    /// present; slope estimates are less biased by fixed per-iteration
    /// overhead. Returns `None` when neither statistic exists or the
    /// document does not parse.
    pub fn from_json(json: &str) -> Option<Self> {
        let file: EstimatesFile = serde_json::from_str(json).ok()?;
        let statistic = file.slope.or(file.mean)?;
        Some(Estimate {
            seconds: statistic.point_estimate / NANOS_PER_SEC,
            std_err: statistic.standard_error / NANOS_PER_SEC,
        })
    }
}
