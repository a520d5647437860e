//! Worked scenarios for the stats engine and goal projector, plus the
//! fixture-backed pipeline from CSV file to projection table.

use chrono::NaiveDate;
use networth_core::config::RatesConfig;
use networth_core::data::{
    fetch_rates_or_empty, read_records_from_path, BcbFileProvider, BcbProvider, CachedRateProvider,
    CircuitBreaker, InputError, InstitutionPivot, RateError, RateProvider, RateSource,
};
use networth_core::domain::{GoalInputs, RateQuote, RateSeries, Record};
use networth_core::goal::{
    build_projection_table, lookup_rate, project_goal, run_goal, GoalError, RateOrigin,
};
use networth_core::stats::{compute_stats, Window};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn approx(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() < eps,
        "actual={actual}, expected={expected}"
    );
}

fn three_months() -> Vec<Record> {
    vec![
        Record::new(date(2024, 1, 1), "A", 100.0),
        Record::new(date(2024, 2, 1), "A", 110.0),
        Record::new(date(2024, 3, 1), "A", 121.0),
    ]
}

// ── Stats ────────────────────────────────────────────────────────────

#[test]
fn ten_percent_growth_scenario() {
    let series = compute_stats(&three_months());
    assert_eq!(series.values(), vec![100.0, 110.0, 121.0]);

    let deltas: Vec<_> = series.rows().iter().map(|r| r.monthly_delta).collect();
    assert_eq!(deltas, vec![None, Some(10.0), Some(11.0)]);

    let rows = series.rows();
    assert_eq!(rows[0].monthly_pct, None);
    approx(rows[1].monthly_pct.unwrap(), 0.10, 1e-12);
    approx(rows[2].monthly_pct.unwrap(), 0.10, 1e-12);
}

#[test]
fn zero_total_makes_next_pct_non_finite_not_missing() {
    let series = compute_stats(&[
        Record::new(date(2024, 1, 1), "A", 0.0),
        Record::new(date(2024, 2, 1), "A", 10.0),
    ]);
    let pct = series.rows()[1].monthly_pct;
    assert!(pct.is_some());
    assert!(pct.unwrap().is_infinite());
}

// ── Goal ─────────────────────────────────────────────────────────────

#[test]
fn goal_scenario_from_worked_example() {
    let series = compute_stats(&three_months());
    let rates = RateSeries::new(vec![RateQuote {
        start: date(2024, 1, 1),
        end: None,
        annual_rate_pct: 12.0,
    }]);
    let inputs = GoalInputs::new(date(2024, 3, 1), 400.0, 1200.0, 1000.0);

    let p = project_goal(&series, &inputs, &rates, date(2024, 12, 1)).unwrap();
    assert_eq!(p.baseline_date, date(2024, 3, 1));
    assert_eq!(p.baseline_value, 121.0);
    approx(p.monthly_rate, 0.009489, 1e-6);
    approx(p.monthly_potential, 601.15, 0.005);
    approx(p.annual_potential, 7201.15, 0.005);

    let table = build_projection_table(&series, 7201.15, p.baseline_date, p.baseline_value);
    approx(table.rows()[0].target, 721.10, 1e-9);
    assert_eq!(table.rows()[0].month_label(), "2024-04");
    assert!(table.rows().iter().all(|r| r.actual.is_none()));
}

#[test]
fn run_goal_defaults_goal_to_potential() {
    let series = compute_stats(&three_months());
    let inputs = GoalInputs::new(date(2024, 3, 15), 400.0, 0.0, 1000.0).with_annual_rate(12.0);
    let report = run_goal(&series, &inputs, &RateSeries::empty(), date(2024, 12, 1)).unwrap();
    assert_eq!(report.projection.annual_goal, report.projection.annual_potential);
    assert_eq!(report.table.len(), 12);
    assert_eq!(report.table.rows()[0].reference_month, date(2024, 4, 1));
}

// ── Rates ────────────────────────────────────────────────────────────

#[test]
fn saved_payload_drives_benchmark_lookup() {
    let provider = CachedRateProvider::daily(BcbFileProvider::new(fixture("selic_history.json")));
    let outcome = fetch_rates_or_empty(&provider);
    assert!(outcome.is_ok());
    assert_eq!(outcome.source, Some(RateSource::File));
    assert_eq!(outcome.series.len(), 5);

    let today = date(2024, 7, 1);
    assert_eq!(
        lookup_rate(&outcome.series, date(2024, 4, 1), today)
            .unwrap()
            .annual_rate_pct(),
        10.75
    );
    assert_eq!(
        lookup_rate(&outcome.series, date(2024, 6, 30), today)
            .unwrap()
            .annual_rate_pct(),
        10.5
    );
    // 2024-05-08 is the last day of the 10.75 quote; the next one starts on the 9th
    assert_eq!(
        lookup_rate(&outcome.series, date(2024, 5, 8), today)
            .unwrap()
            .annual_rate_pct(),
        10.75
    );
    assert_eq!(
        lookup_rate(&outcome.series, date(2024, 5, 9), today)
            .unwrap()
            .annual_rate_pct(),
        10.5
    );
    // every day from the oldest quote's start through today has exactly one quote
    let mut day = date(2023, 11, 2);
    while day <= today {
        let m = lookup_rate(&outcome.series, day, today).unwrap();
        assert!(!m.is_ambiguous(), "{day}");
        day = day.succ_opt().unwrap();
    }
    assert!(lookup_rate(&outcome.series, date(2023, 11, 1), today).is_err());

    // second fetch is served from memory
    assert_eq!(provider.fetch().unwrap().source, RateSource::Cache);
}

#[test]
fn network_failure_yields_empty_series_and_error() {
    let config = RatesConfig {
        url: "http://127.0.0.1:9/historicotaxasjuros".into(),
        timeout_secs: 2,
        max_retries: 0,
        base_delay_ms: 1,
        cache_ttl_hours: 24,
    };
    let provider = BcbProvider::new(&config, Arc::new(CircuitBreaker::default_provider())).unwrap();
    let outcome = fetch_rates_or_empty(&provider);
    assert!(outcome.series.is_empty());
    assert!(matches!(outcome.error, Some(RateError::NetworkUnreachable(_))));

    // the goal screen degrades to "enter the rate manually"
    let series = compute_stats(&three_months());
    let inputs = GoalInputs::new(date(2024, 3, 1), 400.0, 0.0, 1000.0);
    let err = project_goal(&series, &inputs, &outcome.series, date(2024, 12, 1)).unwrap_err();
    assert_eq!(err, GoalError::RateUnavailable);
}

// ── Fixture pipeline ─────────────────────────────────────────────────

#[test]
fn fixture_csv_to_projection_table() {
    let records = read_records_from_path(&fixture("patrimonio.csv")).unwrap();
    assert_eq!(records.len(), 26 * 2 + 16);

    let pivot = InstitutionPivot::from_records(&records);
    assert_eq!(
        pivot.institutions(),
        ["Nubank", "Tesouro Direto", "XP Investimentos"]
    );
    let first = pivot.row(date(2022, 1, 1)).unwrap();
    assert_eq!(first.values[1], None);

    let series = compute_stats(&records);
    assert_eq!(series.len(), 26);
    assert_eq!(series.first_date(), Some(date(2022, 1, 1)));
    assert_eq!(series.last_date(), Some(date(2024, 2, 1)));

    // 24 rows of history reach the longest window on row index 23
    let rows = series.rows();
    assert!(rows[22].accum.get(Window::TwentyFour).is_none());
    assert!(rows[23].accum.get(Window::TwentyFour).is_some());
    assert!(rows[24].trend.get(Window::TwentyFour).is_some());

    let rates = BcbFileProvider::new(fixture("selic_history.json"))
        .fetch()
        .unwrap()
        .series;
    let inputs = GoalInputs::new(date(2023, 6, 15), 3000.0, 9000.0, 7000.0);
    let report = run_goal(&series, &inputs, &rates, date(2024, 7, 1));
    // June 2023 predates the payload's oldest quote
    assert_eq!(
        report.unwrap_err(),
        GoalError::RateLookupMiss {
            date: date(2023, 6, 15)
        }
    );

    let inputs = GoalInputs::new(date(2023, 12, 20), 3000.0, 9000.0, 7000.0);
    let report = run_goal(&series, &inputs, &rates, date(2024, 7, 1)).unwrap();
    assert_eq!(report.projection.baseline_date, date(2023, 12, 1));
    assert_eq!(report.projection.annual_rate_pct, 11.75);
    assert_eq!(
        report.projection.rate_origin,
        RateOrigin::Benchmark { overlapping: 0 }
    );
    // January and February 2024 are in the file
    assert!(report.table.rows()[0].actual.is_some());
    assert!(report.table.rows()[1].actual.is_some());
    assert!(report.table.rows()[2].actual.is_none());
}

#[test]
fn csv_on_disk_with_missing_column_fails_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Data,Banco,Valor").unwrap();
    writeln!(file, "01/01/2024,Nubank,10").unwrap();
    file.flush().unwrap();

    let err = read_records_from_path(file.path()).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn("Instituição")));
    assert_eq!(err.to_string(), "missing required column 'Instituição'");
}

#[test]
fn session_over_fixture_bytes_recomputes_once() {
    let bytes = std::fs::read(fixture("patrimonio.csv")).unwrap();
    let mut session = networth_core::Session::new();
    assert_eq!(
        session.load(&bytes).unwrap(),
        networth_core::LoadStatus::Recomputed
    );
    assert_eq!(
        session.load(&bytes).unwrap(),
        networth_core::LoadStatus::Unchanged
    );
    assert_eq!(session.series().len(), 26);

    let inputs = GoalInputs::new(date(2024, 1, 10), 3000.0, 9000.0, 7000.0).with_annual_rate(10.0);
    let report = session.goal(&inputs, &RateSeries::empty(), date(2024, 7, 1)).unwrap();
    assert_eq!(report.projection.baseline_date, date(2024, 1, 1));
    assert_eq!(report.table.last_reached().unwrap().offset, 1);
}
