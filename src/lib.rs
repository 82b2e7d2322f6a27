//! covmon_service — retrieval-and-analysis core for a regional case-count
//! monitor.
//!
//! The service scrapes a daily new-case series for a selected Italian region
//! and province out of the statistics site's HTML, derives summary
//! statistics and chart input, and keeps the view fresh on a failure-aware
//! schedule. The graphical shell, chart rendering, and clipboard/export
//! surfaces live outside this crate and talk to it through `refresh::Scheduler`
//! accessors, the `model::ChartRenderer` seam, and `session` load/save.

pub mod analysis;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod regions;
pub mod session;
