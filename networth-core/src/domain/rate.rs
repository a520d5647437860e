//! Benchmark rate quotes (SELIC target) and their validity intervals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Annual benchmark rate in effect over `[start, end)`.
///
/// An open-ended quote (`end == None`) is still in effect; lookups close it at
/// the end of "today" (inclusive), which the caller passes in explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    /// Annual rate in percent (13.75 means 13.75% a year).
    pub annual_rate_pct: f64,
}

impl RateQuote {
    /// Exclusive end of the validity interval. An open end covers `today` itself.
    pub fn effective_end(&self, today: NaiveDate) -> NaiveDate {
        self.end.unwrap_or_else(|| today.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    /// True if `date` falls in `[start, end)`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.start <= date && date < self.effective_end(today)
    }
}

/// Rate quotes in the order the provider returned them.
///
/// Source order matters: it is the tie-break when two quotes overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    quotes: Vec<RateQuote>,
}

impl RateSeries {
    pub fn new(quotes: Vec<RateQuote>) -> Self {
        Self { quotes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quotes(&self) -> &[RateQuote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// All quotes containing `date`, in source order.
    pub fn matching(&self, date: NaiveDate, today: NaiveDate) -> Vec<&RateQuote> {
        self.quotes
            .iter()
            .filter(|q| q.contains(date, today))
            .collect()
    }
}
