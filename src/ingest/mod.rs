//! Retrieval of the raw case-count series from the statistics site.
//!
//! Submodules:
//! - `source` — URL construction, connectivity probe, HTTP fetch, and
//!   extraction of the embedded numeric series from the page body.

pub mod source;
