//! Core data types for the regional case-count monitoring service.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no I/O and no network access — only types and the derived
//! report structure.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The (region, province) pair the user is currently viewing.
///
/// For the whole-country pseudo-region the province is the empty string —
/// the catalog stores a single empty placeholder entry for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub region: String,
    pub province: String,
}

impl Selection {
    pub fn new(region: impl Into<String>, province: impl Into<String>) -> Self {
        Selection {
            region: region.into(),
            province: province.into(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.province.is_empty() {
            write!(f, "{}", self.region)
        } else {
            write!(f, "{} / {}", self.region, self.province)
        }
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// An ordered sequence of daily new-case counts, oldest first.
///
/// Invariant: at least two points, so a latest-vs-previous delta always
/// exists. Construction is the only place the invariant is checked; a
/// `Series` is immutable afterwards and is superseded wholesale by the
/// next successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    values: Vec<i64>,
}

impl Series {
    /// Returns `None` if fewer than two values are supplied.
    pub fn new(values: Vec<i64>) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }
        Some(Series { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false // invariant: len >= 2
    }

    pub fn latest(&self) -> i64 {
        self.values[self.values.len() - 1]
    }

    pub fn previous(&self) -> i64 {
        self.values[self.values.len() - 2]
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Whether the latest value is an extreme of its series.
///
/// When the latest value equals both the minimum and the maximum (a series
/// with a single distinct value), the minimum wins — first-match rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Minimum,
    Maximum,
    Neither,
}

/// Which numeric sequence to hand to the chart collaborator.
///
/// `Raw` is the default (current behavior); `FirstDifference` charts the
/// day-over-day deltas instead (the service's earlier behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    #[default]
    Raw,
    FirstDifference,
}

/// Derived, immutable statistics snapshot of one `Series`.
///
/// Constructed atomically by `analysis::stats::analyze_at`; never partially
/// updated. The rendered `status` line is what the presentation layer shows
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub latest: i64,
    /// Signed difference between the latest and the previous value.
    pub delta: i64,
    pub extreme: Extreme,
    /// Arithmetic mean, rounded half-away-from-zero (`f64::round`).
    pub mean: i64,
    pub min: i64,
    pub max: i64,
    pub sum: i64,
    /// The full series the statistics were derived from.
    pub values: Vec<i64>,
    pub status: String,
}

impl Report {
    /// Day-over-day deltas of the series: `values[i+1] - values[i]`.
    pub fn first_difference(&self) -> Vec<i64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// The sequence to chart under the given mode.
    pub fn chart_series(&self, mode: ChartMode) -> Vec<i64> {
        match mode {
            ChartMode::Raw => self.values.clone(),
            ChartMode::FirstDifference => self.first_difference(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or extracting the case-count series.
///
/// All variants are recoverable by retry; the source client never lets a
/// failure propagate past its boundary as a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The connectivity probe failed — no network at all.
    NoConnectivity,
    /// The HTTP request itself failed (DNS, TLS, non-2xx status, ...).
    Transport(String),
    /// The page answered but did not contain a usable series for this
    /// selection (too few embedded arrays, or the expected slot is gone).
    DataUnavailable { region: String, province: String },
    /// An embedded array was found but its content did not parse.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NoConnectivity => {
                write!(f, "nessuna connessione di rete presente")
            }
            FetchError::Transport(detail) => {
                write!(f, "impossibile stabilire la connessione con la fonte\n{}", detail)
            }
            FetchError::DataUnavailable { region, province } => {
                if province.is_empty() {
                    write!(f, "dati non disponibili per: {}", region)
                } else {
                    write!(f, "dati non disponibili per: {} {}", region, province)
                }
            }
            FetchError::Parse(detail) => {
                write!(f, "dati non leggibili: {}", detail)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Tagged result of one fetch-and-analyze cycle.
pub type Outcome = Result<Report, FetchError>;

// ---------------------------------------------------------------------------
// External collaborator seams
// ---------------------------------------------------------------------------

/// Chart rendering collaborator.
///
/// The core supplies only the numeric sequence and a target path; plotting
/// parameters, image format, and resizing belong to the implementor.
pub trait ChartRenderer {
    fn render(&self, values: &[i64], target: &Path) -> Result<(), Box<dyn std::error::Error>>;
}

/// Last saved window position, persisted alongside the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPos {
    pub x: i32,
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
