//! Property tests for the consolidated series.
//!
//! Uses proptest to verify:
//! 1. Window columns are absent everywhere when the series is shorter than the window
//! 2. accum_w is the endpoint difference V[i] - V[i-w+1], not a sum of deltas
//! 3. Dates strictly increase and totals are conserved
//! 4. A constant series has zero deltas, trends, accumulations and growths

use chrono::{Months, NaiveDate};
use networth_core::domain::Record;
use networth_core::stats::{compute_stats, Window};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    (1.0..1_000_000.0_f64).prop_map(|v| (v * 100.0).round() / 100.0)
}

fn arb_values(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_value(), 1..max_len)
}

fn month(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .checked_add_months(Months::new(i as u32))
        .unwrap()
}

fn monthly_records(values: &[f64]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Record::new(month(i), "Conta", v))
        .collect()
}

// ── 1. Short series ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn short_series_has_no_window_values(values in arb_values(24)) {
        let series = compute_stats(&monthly_records(&values));
        for w in Window::ALL {
            if values.len() < w.len() {
                for row in series.rows() {
                    prop_assert!(row.trend.get(w).is_none());
                    prop_assert!(row.accum.get(w).is_none());
                    prop_assert!(row.growth.get(w).is_none());
                }
            }
        }
    }
}

// ── 2. Accumulation identity ─────────────────────────────────────────

proptest! {
    #[test]
    fn accum_is_endpoint_difference(values in arb_values(60)) {
        let series = compute_stats(&monthly_records(&values));
        let v = series.values();
        for w in Window::ALL {
            let lb = w.len() - 1;
            for (i, row) in series.rows().iter().enumerate() {
                if i >= lb {
                    prop_assert_eq!(row.accum.get(w), Some(v[i] - v[i - lb]));
                    prop_assert_eq!(row.growth.get(w), Some(v[i] / v[i - lb] - 1.0));
                } else {
                    prop_assert_eq!(row.accum.get(w), None);
                }
            }
        }
    }

    #[test]
    fn trend_first_valid_row_is_window(values in arb_values(60)) {
        let series = compute_stats(&monthly_records(&values));
        for w in Window::ALL {
            for (i, row) in series.rows().iter().enumerate() {
                prop_assert_eq!(row.trend.get(w).is_some(), i >= w.len());
            }
        }
    }
}

// ── 3. Ordering and conservation ─────────────────────────────────────

proptest! {
    /// Records in any order, several institutions per date.
    #[test]
    fn dates_strictly_increase_and_totals_are_conserved(
        entries in prop::collection::vec((0usize..36, 0usize..4, arb_value()), 1..120),
    ) {
        let records: Vec<Record> = entries
            .iter()
            .map(|&(m, inst, v)| Record::new(month(m), format!("Inst{inst}"), v))
            .collect();
        let series = compute_stats(&records);

        for pair in series.rows().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }

        let input_total: f64 = records.iter().map(|r| r.value).sum();
        let series_total: f64 = series.values().iter().sum();
        prop_assert!((input_total - series_total).abs() < 1e-6 * input_total.max(1.0));
    }
}

// ── 4. Constant series ───────────────────────────────────────────────

proptest! {
    #[test]
    fn constant_series_is_flat(value in arb_value(), len in 24usize..40) {
        let series = compute_stats(&monthly_records(&vec![value; len]));
        for (i, row) in series.rows().iter().enumerate() {
            if i >= 1 {
                prop_assert_eq!(row.monthly_delta, Some(0.0));
                prop_assert_eq!(row.monthly_pct, Some(0.0));
            }
            for w in Window::ALL {
                if i >= w.len() {
                    prop_assert_eq!(row.trend.get(w), Some(0.0));
                }
                if i + 1 >= w.len() {
                    prop_assert_eq!(row.accum.get(w), Some(0.0));
                    prop_assert_eq!(row.growth.get(w), Some(0.0));
                }
            }
        }
    }
}
