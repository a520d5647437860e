//! Benchmark rate lookup by date.

use super::GoalError;
use crate::domain::{RateQuote, RateSeries};
use chrono::NaiveDate;

/// The quote chosen for a date.
#[derive(Debug, Clone, PartialEq)]
pub struct RateMatch {
    pub quote: RateQuote,
    /// Other quotes whose interval also contains the date. Non-zero means the
    /// provider data overlaps and the first quote in source order was taken.
    pub overlapping: usize,
}

impl RateMatch {
    pub fn annual_rate_pct(&self) -> f64 {
        self.quote.annual_rate_pct
    }

    pub fn is_ambiguous(&self) -> bool {
        self.overlapping > 0
    }
}

/// Find the quote in effect on `date`. Open-ended quotes run through `today`.
pub fn lookup_rate(
    rates: &RateSeries,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<RateMatch, GoalError> {
    if rates.is_empty() {
        return Err(GoalError::RateUnavailable);
    }

    let hits = rates.matching(date, today);
    let (first, rest) = hits
        .split_first()
        .ok_or(GoalError::RateLookupMiss { date })?;

    if !rest.is_empty() {
        tracing::warn!(
            %date,
            chosen = first.annual_rate_pct,
            overlapping = rest.len(),
            "several rate quotes cover this date; using the first in source order"
        );
    }

    Ok(RateMatch {
        quote: (*first).clone(),
        overlapping: rest.len(),
    })
}
