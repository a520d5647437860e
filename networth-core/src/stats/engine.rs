//! Consolidated series: per-date totals plus trend and growth columns.

use super::window::{deltas, pct_changes, Accumulation, Growth, Trend, Window, WindowMetric};
use crate::domain::Record;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// One value per reported window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowValues {
    pub m6: Option<f64>,
    pub m12: Option<f64>,
    pub m24: Option<f64>,
}

impl WindowValues {
    pub fn get(&self, window: Window) -> Option<f64> {
        match window {
            Window::Six => self.m6,
            Window::Twelve => self.m12,
            Window::TwentyFour => self.m24,
        }
    }

    fn set(&mut self, window: Window, value: Option<f64>) {
        match window {
            Window::Six => self.m6 = value,
            Window::Twelve => self.m12 = value,
            Window::TwentyFour => self.m24 = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    pub date: NaiveDate,
    /// Sum of every institution's value on `date`.
    pub value: f64,
    pub monthly_delta: Option<f64>,
    pub monthly_pct: Option<f64>,
    pub trend: WindowValues,
    pub accum: WindowValues,
    pub growth: WindowValues,
}

/// A selectable column, for tables and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatColumn {
    Value,
    MonthlyDelta,
    MonthlyPct,
    Trend(Window),
    Accum(Window),
    Growth(Window),
}

impl StatColumn {
    /// Columns shown on the absolute-values view.
    pub const ABSOLUTE: [StatColumn; 8] = [
        StatColumn::Value,
        StatColumn::MonthlyDelta,
        StatColumn::Trend(Window::Six),
        StatColumn::Trend(Window::Twelve),
        StatColumn::Trend(Window::TwentyFour),
        StatColumn::Accum(Window::Six),
        StatColumn::Accum(Window::Twelve),
        StatColumn::Accum(Window::TwentyFour),
    ];

    /// Columns shown on the relative (percentage) view.
    pub const RELATIVE: [StatColumn; 4] = [
        StatColumn::MonthlyPct,
        StatColumn::Growth(Window::Six),
        StatColumn::Growth(Window::Twelve),
        StatColumn::Growth(Window::TwentyFour),
    ];

    pub fn label(self) -> String {
        match self {
            StatColumn::Value => "value".into(),
            StatColumn::MonthlyDelta => "monthly_delta".into(),
            StatColumn::MonthlyPct => "monthly_pct".into(),
            StatColumn::Trend(w) => Trend(w).name(),
            StatColumn::Accum(w) => Accumulation(w).name(),
            StatColumn::Growth(w) => Growth(w).name(),
        }
    }

    pub fn is_ratio(self) -> bool {
        matches!(self, StatColumn::MonthlyPct | StatColumn::Growth(_))
    }
}

impl StatsRow {
    pub fn get(&self, column: StatColumn) -> Option<f64> {
        match column {
            StatColumn::Value => Some(self.value),
            StatColumn::MonthlyDelta => self.monthly_delta,
            StatColumn::MonthlyPct => self.monthly_pct,
            StatColumn::Trend(w) => self.trend.get(w),
            StatColumn::Accum(w) => self.accum.get(w),
            StatColumn::Growth(w) => self.growth.get(w),
        }
    }
}

/// Per-date totals with derived columns; dates strictly increasing.
///
/// Only [`compute_stats`] and [`ConsolidatedSeries::between`] build one, so
/// the ordering holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsolidatedSeries {
    rows: Vec<StatsRow>,
}

impl ConsolidatedSeries {
    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&StatsRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Latest row dated on or before `date`.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<&StatsRow> {
        let idx = self.rows.partition_point(|r| r.date <= date);
        idx.checked_sub(1).map(|i| &self.rows[i])
    }

    /// Last row falling in the given calendar month.
    pub fn last_in_month(&self, year: i32, month: u32) -> Option<&StatsRow> {
        self.rows
            .iter()
            .rev()
            .find(|r| r.date.year() == year && r.date.month() == month)
    }

    /// Rows dated within `[start, end]`.
    ///
    /// Derived columns keep the values computed on the full history.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> ConsolidatedSeries {
        ConsolidatedSeries {
            rows: self
                .rows
                .iter()
                .filter(|r| start <= r.date && r.date <= end)
                .cloned()
                .collect(),
        }
    }

    /// One column as `(date, value)` pairs.
    pub fn column(&self, column: StatColumn) -> Vec<(NaiveDate, Option<f64>)> {
        self.rows.iter().map(|r| (r.date, r.get(column))).collect()
    }
}

/// Build the consolidated series from raw records.
///
/// Records sharing a date are summed (institutions and any duplicate rows
/// alike). Empty input gives an empty series.
pub fn compute_stats(records: &[Record]) -> ConsolidatedSeries {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.value;
    }

    let dates: Vec<NaiveDate> = totals.keys().copied().collect();
    let values: Vec<f64> = totals.values().copied().collect();

    let monthly_delta = deltas(&values);
    let monthly_pct = pct_changes(&values);

    let mut rows: Vec<StatsRow> = dates
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (&date, &value))| StatsRow {
            date,
            value,
            monthly_delta: monthly_delta[i],
            monthly_pct: monthly_pct[i],
            trend: WindowValues::default(),
            accum: WindowValues::default(),
            growth: WindowValues::default(),
        })
        .collect();

    for window in Window::ALL {
        let trend = Trend(window).compute(&values);
        let accum = Accumulation(window).compute(&values);
        let growth = Growth(window).compute(&values);
        for (i, row) in rows.iter_mut().enumerate() {
            row.trend.set(window, trend[i]);
            row.accum.set(window, accum[i]);
            row.growth.set(window, growth[i]);
        }
    }

    tracing::debug!(
        records = records.len(),
        rows = rows.len(),
        "consolidated series computed"
    );

    ConsolidatedSeries { rows }
}
