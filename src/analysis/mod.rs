//! Derived statistics for a fetched case-count series.
//!
//! Chart rendering is handled by an external plotting collaborator that
//! receives only the chosen numeric sequence (`Report::chart_series`).
//!
//! Submodules:
//! - `stats` — turns one `Series` into an immutable `Report`.

pub mod stats;
