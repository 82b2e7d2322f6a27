//! Statistics engine: one `Series` in, one `Report` out.
//!
//! # Clock injection
//! The status line opens with the weekday and date, so `analyze_at` accepts
//! `today` as a parameter rather than reading the clock internally. This
//! keeps the function deterministic in tests; `analyze` is the real-clock
//! convenience wrapper.

use chrono::{Datelike, Local, NaiveDate};

use crate::model::{Extreme, Report, Series};

/// Italian weekday names, Monday first, for the status line header.
const WEEKDAYS: [&str; 7] = [
    "Lunedì",
    "Martedì",
    "Mercoledì",
    "Giovedì",
    "Venerdì",
    "Sabato",
    "Domenica",
];

/// Derives the full report from a series, with `today` injected.
///
/// Deterministic and side-effect-free: the same series and date always
/// produce an identical report.
pub fn analyze_at(series: &Series, today: NaiveDate) -> Report {
    let values = series.values();
    let latest = series.latest();
    let delta = latest - series.previous();

    // min/max over a non-empty slice; the Series invariant guarantees it.
    let min = values.iter().copied().min().unwrap_or(latest);
    let max = values.iter().copied().max().unwrap_or(latest);
    let sum: i64 = values.iter().sum();
    let mean = (sum as f64 / values.len() as f64).round() as i64;

    // First-match rule: a series with a single distinct value annotates as
    // minimum, never maximum.
    let extreme = if latest == min {
        Extreme::Minimum
    } else if latest == max {
        Extreme::Maximum
    } else {
        Extreme::Neither
    };

    let status = render_status(today, latest, delta, extreme, values.len(), mean, min, max);

    Report {
        latest,
        delta,
        extreme,
        mean,
        min,
        max,
        sum,
        values: values.to_vec(),
        status,
    }
}

/// Real-clock wrapper around `analyze_at`.
pub fn analyze(series: &Series) -> Report {
    analyze_at(series, Local::now().date_naive())
}

#[allow(clippy::too_many_arguments)]
fn render_status(
    today: NaiveDate,
    latest: i64,
    delta: i64,
    extreme: Extreme,
    days: usize,
    mean: i64,
    min: i64,
    max: i64,
) -> String {
    // A zero delta is omitted entirely, never rendered as "(+0)".
    let delta_part = if delta == 0 {
        String::new()
    } else {
        format!(" ({:+})", delta)
    };
    let extreme_part = match extreme {
        Extreme::Minimum => " (minimo)",
        Extreme::Maximum => " (massimo)",
        Extreme::Neither => "",
    };
    let weekday = WEEKDAYS[today.weekday().num_days_from_monday() as usize];

    format!(
        "{weekday} {today}\n\
         {latest} ultimi nuovi positivi{delta_part}{extreme_part}\n\
         statistiche sugli ultimi {days} giorni\n\
         media giornaliera: {mean}\n\
         minimo: {min}, massimo: {max}"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartMode;

    fn series(values: &[i64]) -> Series {
        Series::new(values.to_vec()).expect("test series has at least two points")
    }

    /// A fixed "today" used across all tests: Friday 2026-08-28.
    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    // --- Worked scenario: [10, 12, 9, 15, 11] -------------------------------

    #[test]
    fn test_mixed_series_statistics() {
        let report = analyze_at(&series(&[10, 12, 9, 15, 11]), fixed_today());
        assert_eq!(report.latest, 11);
        assert_eq!(report.delta, -4);
        assert_eq!(report.min, 9);
        assert_eq!(report.max, 15);
        // mean = 57 / 5 = 11.4, rounds to 11.
        assert_eq!(report.mean, 11);
        assert_eq!(report.sum, 57);
        // 11 is neither the minimum nor the maximum.
        assert_eq!(report.extreme, Extreme::Neither);
    }

    #[test]
    fn test_negative_delta_renders_bare_minus() {
        let report = analyze_at(&series(&[10, 12, 9, 15, 11]), fixed_today());
        assert!(report.status.contains("(-4)"), "status was: {}", report.status);
        assert!(!report.status.contains("minimo)"), "no extreme annotation expected");
    }

    #[test]
    fn test_positive_delta_renders_explicit_plus() {
        let report = analyze_at(&series(&[3, 9]), fixed_today());
        assert_eq!(report.delta, 6);
        assert!(report.status.contains("(+6)"), "status was: {}", report.status);
    }

    // --- Worked scenario: [5, 5] --------------------------------------------

    #[test]
    fn test_flat_series_omits_delta_and_annotates_minimum() {
        let report = analyze_at(&series(&[5, 5]), fixed_today());
        assert_eq!(report.delta, 0);
        // Zero delta: no parenthetical at all, in particular no "(+0)".
        assert!(!report.status.contains("(+0)"), "status was: {}", report.status);
        assert!(!report.status.contains("(0)"), "status was: {}", report.status);
        // min == max == latest: first-match rule picks the minimum.
        assert_eq!(report.extreme, Extreme::Minimum);
        assert!(report.status.contains("(minimo)"));
        assert!(!report.status.contains("(massimo)"));
    }

    #[test]
    fn test_latest_equal_to_maximum_annotates_maximum() {
        let report = analyze_at(&series(&[3, 7, 9]), fixed_today());
        assert_eq!(report.extreme, Extreme::Maximum);
        assert!(report.status.contains("(massimo)"));
    }

    #[test]
    fn test_latest_equal_to_minimum_annotates_minimum() {
        let report = analyze_at(&series(&[9, 7, 3]), fixed_today());
        assert_eq!(report.extreme, Extreme::Minimum);
    }

    // --- Rounding -----------------------------------------------------------

    #[test]
    fn test_mean_uses_rust_standard_rounding() {
        // f64::round rounds half away from zero (counts are non-negative,
        // so halves round up): 15 / 2 = 7.5 -> 8.
        let report = analyze_at(&series(&[7, 8]), fixed_today());
        assert_eq!(report.mean, 8);
        // 5 / 2 = 2.5 -> 3, not 2 as banker's rounding would give.
        let report = analyze_at(&series(&[2, 3]), fixed_today());
        assert_eq!(report.mean, 3);
    }

    // --- General properties -------------------------------------------------

    #[test]
    fn test_delta_matches_last_two_points() {
        for values in [&[0, 0][..], &[1, 100], &[50, 20, 80, 35]] {
            let s = series(values);
            let report = analyze_at(&s, fixed_today());
            assert_eq!(report.delta, values[values.len() - 1] - values[values.len() - 2]);
        }
    }

    #[test]
    fn test_extremes_bound_every_element() {
        let report = analyze_at(&series(&[4, 18, 2, 9, 11]), fixed_today());
        for v in &report.values {
            assert!(report.min <= *v && *v <= report.max);
        }
        assert_eq!(report.sum, report.values.iter().sum::<i64>());
    }

    #[test]
    fn test_analyze_at_is_idempotent() {
        let s = series(&[10, 12, 9, 15, 11]);
        let a = analyze_at(&s, fixed_today());
        let b = analyze_at(&s, fixed_today());
        assert_eq!(a, b, "same series and date must yield identical reports");
    }

    // --- Status line --------------------------------------------------------

    #[test]
    fn test_status_line_full_rendering() {
        let report = analyze_at(&series(&[10, 12, 9, 15, 11]), fixed_today());
        assert_eq!(
            report.status,
            "Venerdì 2026-08-28\n\
             11 ultimi nuovi positivi (-4)\n\
             statistiche sugli ultimi 5 giorni\n\
             media giornaliera: 11\n\
             minimo: 9, massimo: 15"
        );
    }

    #[test]
    fn test_weekday_header_follows_injected_date() {
        // 2026-08-31 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let report = analyze_at(&series(&[1, 2]), monday);
        assert!(report.status.starts_with("Lunedì 2026-08-31"));
    }

    // --- Chart input --------------------------------------------------------

    #[test]
    fn test_chart_series_raw_is_default() {
        let report = analyze_at(&series(&[10, 12, 9, 15, 11]), fixed_today());
        assert_eq!(report.chart_series(ChartMode::default()), vec![10, 12, 9, 15, 11]);
    }

    #[test]
    fn test_chart_series_first_difference() {
        let report = analyze_at(&series(&[10, 12, 9, 15, 11]), fixed_today());
        assert_eq!(
            report.chart_series(ChartMode::FirstDifference),
            vec![2, -3, 6, -4]
        );
    }
}
