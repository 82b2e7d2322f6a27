//! Source client for the statistics site.
//!
//! The site is an HTML page, not a structured API: each location page embeds
//! a handful of chart definitions whose `data: [...]` array literals carry
//! the numeric series. This module owns every structural assumption about
//! that layout — the marker pattern, the positional index of the series we
//! want, and the bracket parsing — so a page redesign is absorbed here as a
//! `DataUnavailable` failure and never reaches the statistics engine.
//!
//! Every failure path returns a `FetchError` value; nothing past this
//! boundary panics on bad remote data.

use std::net::{SocketAddr, TcpStream};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::model::{FetchError, Selection, Series};
use crate::regions::{AUTONOMOUS_PROVINCE_REGION, is_whole_country};

const BASE_URL: &str = "https://statistichecoronavirus.it";

/// Well-known reachable host for the fast connectivity probe.
const PROBE_ADDR: &str = "1.1.1.1:53";
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Marker pattern for the embedded chart arrays. Matches run to end of line,
/// in order of appearance, exactly as the page emits them.
static DATA_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:.*").expect("marker pattern is valid"));

/// The page carries several chart definitions; the daily new-case series is
/// the fourth on a province page but the first on the country listing page.
/// Positional, by necessity — the page offers nothing better to key on.
const PROVINCE_SERIES_INDEX: usize = 3;
const COUNTRY_SERIES_INDEX: usize = 0;

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// URL form used for a region. A closed set, so future per-region exceptions
/// become new variants instead of growing a conditional in the fetch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// `{base}/coronavirus-italia/coronavirus-{region}/coronavirus-{province}/`
    Standard,
    /// Trentino Alto Adige: its provinces are autonomous and live directly
    /// under `{base}/coronavirus-italia/coronavirus-pa-{province}/`.
    AutonomousProvince,
    /// Whole country: the base listing page, no location suffix at all.
    CountryWide,
}

pub fn url_rule_for(region: &str) -> UrlRule {
    if is_whole_country(region) {
        UrlRule::CountryWide
    } else if region.eq_ignore_ascii_case(AUTONOMOUS_PROVINCE_REGION) {
        UrlRule::AutonomousProvince
    } else {
        UrlRule::Standard
    }
}

/// Site slug for a location name: lower-case, spaces and apostrophes to
/// hyphens. "Valle d'Aosta" becomes "valle-d-aosta".
pub fn clean_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '\''], "-")
}

/// Deterministic page URL for a selection.
pub fn build_url(selection: &Selection) -> String {
    match url_rule_for(&selection.region) {
        UrlRule::CountryWide => format!("{}/coronavirus-italia/", BASE_URL),
        UrlRule::AutonomousProvince => format!(
            "{}/coronavirus-italia/coronavirus-pa-{}/",
            BASE_URL,
            clean_name(&selection.province)
        ),
        UrlRule::Standard => format!(
            "{}/coronavirus-italia/coronavirus-{}/coronavirus-{}/",
            BASE_URL,
            clean_name(&selection.region),
            clean_name(&selection.province)
        ),
    }
}

// ---------------------------------------------------------------------------
// Connectivity probe
// ---------------------------------------------------------------------------

/// Fast reachability check against a public resolver.
///
/// Failing here short-circuits the fetch with `NoConnectivity` instead of
/// waiting out the HTTP client's own, much longer timeout.
pub fn is_connected() -> bool {
    probe(PROBE_ADDR, PROBE_TIMEOUT)
}

fn probe(addr: &str, timeout: Duration) -> bool {
    match addr.parse::<SocketAddr>() {
        Ok(addr) => TcpStream::connect_timeout(&addr, timeout).is_ok(),
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Pulls the case-count series for `selection` out of a fetched page body.
///
/// Pure with respect to the body, so the layout assumptions are testable
/// without network access.
pub fn extract_series(body: &str, selection: &Selection) -> Result<Series, FetchError> {
    let unavailable = || FetchError::DataUnavailable {
        region: selection.region.clone(),
        province: selection.province.clone(),
    };

    let matches: Vec<&str> = DATA_MARKER.find_iter(body).map(|m| m.as_str()).collect();
    // A well-formed location page carries at least four chart definitions;
    // fewer means this is not the page layout we know how to read.
    if matches.len() < 4 {
        return Err(unavailable());
    }

    let index = match url_rule_for(&selection.region) {
        UrlRule::CountryWide => COUNTRY_SERIES_INDEX,
        _ => PROVINCE_SERIES_INDEX,
    };
    let line = matches.get(index).ok_or_else(unavailable)?;

    let values = parse_array_literal(line)?;
    Series::new(values).ok_or_else(unavailable)
}

/// Parses the `[...]` integer literal embedded in one marker line. The live
/// page leaves a trailing comma before the closing bracket; tolerate it.
fn parse_array_literal(line: &str) -> Result<Vec<i64>, FetchError> {
    let open = line
        .find('[')
        .ok_or_else(|| FetchError::Parse(format!("no '[' in marker line: {line}")))?;
    let close = line
        .find(']')
        .ok_or_else(|| FetchError::Parse(format!("no ']' in marker line: {line}")))?;
    if close < open {
        return Err(FetchError::Parse(format!("brackets out of order: {line}")));
    }

    line[open + 1..close]
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|e| FetchError::Parse(format!("bad value '{}': {}", token.trim(), e)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Builds an HTTP client with the timeout the service runs with.
pub fn default_client() -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

/// Probe, GET, extract. The single entry point the scheduler calls.
pub fn fetch(
    client: &reqwest::blocking::Client,
    selection: &Selection,
) -> Result<Series, FetchError> {
    if !is_connected() {
        return Err(FetchError::NoConnectivity);
    }

    let url = build_url(selection);
    let response = client
        .get(&url)
        .send()
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if !response.status().is_success() {
        return Err(FetchError::Transport(format!("HTTP error: {}", response.status())));
    }
    let body = response
        .text()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    extract_series(&body, selection)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
