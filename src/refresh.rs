//! Refresh scheduler for the monitoring view.
//!
//! An explicit state machine driven by discrete events — a refresh request,
//! a selection change, a timer tick — instead of ad hoc field mutation from
//! callback entry points. The scheduler owns all mutable state (current
//! selection, latest outcome, last success time) and never arms a real
//! timer: every transition returns the delay the host loop should arm next,
//! and each returned delay supersedes the previous one, so cancellation is
//! cancel-by-replace and a single fetch cycle is in flight at any time.
//!
//! The asymmetry is deliberate: while healthy we *recheck* cheaply and often
//! (30 s) and only refetch once the view is genuinely stale (6 h); while
//! failing we retry the network at a slower, fixed pace (60 s).
//!
//! # Clock injection
//! All transitions accept `now: DateTime<Utc>`; the `*_now` wrappers use the
//! real clock. Tests drive the machine with a virtual clock and count the
//! fetches a scripted source receives.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::analysis::stats;
use crate::logging;
use crate::model::{FetchError, Outcome, Report, Selection, Series};
use crate::regions;

/// Recheck interval while healthy: a cheap freshness check, not a refetch.
pub const RECHECK_SECS: u64 = 30;
/// Retry interval after any failure: an unconditional refetch.
pub const RETRY_SECS: u64 = 60;
/// A view older than this is stale enough to justify a network call.
pub const STALE_SECS: i64 = 6 * 3600;

// ---------------------------------------------------------------------------
// Source abstraction
// ---------------------------------------------------------------------------

/// Where the scheduler gets its series from. The production implementation
/// is `WebSource`; tests inject a scripted source.
pub trait SeriesSource {
    fn fetch(&self, selection: &Selection) -> Result<Series, FetchError>;
}

/// Live HTTP source backed by `ingest::source`.
pub struct WebSource {
    client: reqwest::blocking::Client,
}

impl WebSource {
    pub fn new() -> Result<Self, FetchError> {
        Ok(WebSource {
            client: crate::ingest::source::default_client()?,
        })
    }
}

impl SeriesSource for WebSource {
    fn fetch(&self, selection: &Selection) -> Result<Series, FetchError> {
        crate::ingest::source::fetch(&self.client, selection)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Scheduler states. `WaitingShort` is the fast-retry path after a failure,
/// `WaitingLong` the healthy freshness-check loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedState {
    Idle,
    WaitingShort,
    WaitingLong,
}

pub struct Scheduler<S: SeriesSource> {
    source: S,
    selection: Selection,
    state: SchedState,
    last_success: Option<DateTime<Utc>>,
    latest: Option<Outcome>,
    /// Last good report, retained across failures so the presentation can
    /// keep showing the old chart next to the failure message.
    last_report: Option<Report>,
}

impl<S: SeriesSource> Scheduler<S> {
    pub fn new(source: S, selection: Selection) -> Self {
        Scheduler {
            source,
            selection,
            state: SchedState::Idle,
            last_success: None,
            latest: None,
            last_report: None,
        }
    }

    // --- Pull accessors -----------------------------------------------------

    pub fn state(&self) -> SchedState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Outcome of the most recent fetch cycle, if any ran yet.
    pub fn latest(&self) -> Option<&Outcome> {
        self.latest.as_ref()
    }

    /// Most recent successful report, surviving later failures.
    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    // --- Events -------------------------------------------------------------

    /// Explicit refresh request: unconditional fetch + analyze, then arm the
    /// next timer per the outcome. Returns the delay to arm.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> Duration {
        let outcome = self
            .source
            .fetch(&self.selection)
            .map(|series| stats::analyze_at(&series, now.date_naive()));

        let delay = match &outcome {
            Ok(report) => {
                self.last_success = Some(now);
                self.last_report = Some(report.clone());
                self.state = SchedState::WaitingLong;
                let location = self.selection.to_string();
                logging::info(logging::Source::Sched, Some(location.as_str()), "refresh succeeded");
                Duration::from_secs(RECHECK_SECS)
            }
            Err(err) => {
                // Every failure kind takes the same retry path; the variants
                // only differ in the message shown to the user.
                self.state = SchedState::WaitingShort;
                logging::log_fetch_failure(&self.selection, err);
                Duration::from_secs(RETRY_SECS)
            }
        };
        self.latest = Some(outcome);
        delay
    }

    /// Timer fired. While failing, refetch unconditionally; while healthy,
    /// refetch only if the view has gone stale, otherwise just re-arm.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Duration {
        match self.state {
            SchedState::WaitingShort | SchedState::Idle => self.refresh_at(now),
            SchedState::WaitingLong => {
                if self.is_stale_at(now) {
                    self.refresh_at(now)
                } else {
                    Duration::from_secs(RECHECK_SECS)
                }
            }
        }
    }

    /// Selection change: validate, then force an immediate refetch.
    /// An invalid selection is rejected without touching the current one.
    pub fn set_selection_at(
        &mut self,
        selection: Selection,
        now: DateTime<Utc>,
    ) -> Result<Duration, FetchError> {
        if !regions::validate_selection(&selection) {
            return Err(FetchError::DataUnavailable {
                region: selection.region,
                province: selection.province,
            });
        }
        self.selection = selection;
        Ok(self.refresh_at(now))
    }

    /// Shutdown: no pending delay remains; the host drops its timer.
    pub fn shutdown(&mut self) {
        self.state = SchedState::Idle;
    }

    fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_success {
            Some(at) => (now - at).num_seconds() > STALE_SECS,
            None => true,
        }
    }

    // --- Real-clock wrappers ------------------------------------------------

    pub fn refresh(&mut self) -> Duration {
        self.refresh_at(Utc::now())
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Utc::now())
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<Duration, FetchError> {
        self.set_selection_at(selection, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
