//! Twelve-month projection table: linear target ramp against actual data.

use crate::stats::ConsolidatedSeries;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

pub const PROJECTION_MONTHS: u32 = 12;

/// Round to cents, half away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    /// Months after the baseline, 1..=12.
    pub offset: u32,
    /// Baseline date shifted by `offset` months (day clamped to month end).
    pub reference_month: NaiveDate,
    pub target: f64,
    pub actual: Option<f64>,
    pub difference: Option<f64>,
    /// `actual / target`
    pub pct_of_monthly_target: Option<f64>,
    /// `actual / final_projected_value`
    pub pct_of_annual_actual: Option<f64>,
    /// `target / final_projected_value`
    pub pct_of_annual_expected: f64,
}

impl ProjectionRow {
    /// `YYYY-MM` label of the reference month.
    pub fn month_label(&self) -> String {
        self.reference_month.format("%Y-%m").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionTable {
    rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latest month that already has data, if any.
    pub fn last_reached(&self) -> Option<&ProjectionRow> {
        self.rows.iter().rev().find(|r| r.actual.is_some())
    }
}

/// Build the month-by-month comparison of target vs. actual.
///
/// Each month's step is `round2(annual_goal / 12) * offset`, so rounding
/// drift accumulates across the year and month 12 may miss the goal by a few
/// cents. Ratios with a zero denominator come out non-finite.
pub fn build_projection_table(
    series: &ConsolidatedSeries,
    annual_goal: f64,
    baseline_date: NaiveDate,
    baseline_value: f64,
) -> ProjectionTable {
    let final_projected_value = annual_goal + baseline_value;
    let monthly_step = round2(annual_goal / PROJECTION_MONTHS as f64);

    let rows = (1..=PROJECTION_MONTHS)
        .filter_map(|offset| {
            let reference_month = baseline_date.checked_add_months(Months::new(offset))?;
            let target = baseline_value + monthly_step * offset as f64;
            let actual = series
                .last_in_month(reference_month.year(), reference_month.month())
                .map(|r| r.value);

            Some(ProjectionRow {
                offset,
                reference_month,
                target,
                actual,
                difference: actual.map(|a| a - target),
                pct_of_monthly_target: actual.map(|a| a / target),
                pct_of_annual_actual: actual.map(|a| a / final_projected_value),
                pct_of_annual_expected: target / final_projected_value,
            })
        })
        .collect();

    ProjectionTable { rows }
}
