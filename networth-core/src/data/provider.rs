//! Rate provider trait and structured error types.
//!
//! The RateProvider trait abstracts over where the benchmark series comes from
//! (the central bank's HTTP endpoint, a saved payload on disk, the in-memory
//! cache) so the goal screen can be driven and tested without a network.

use crate::domain::RateSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for rate fetches.
///
/// Displayable as-is to the user; none of them is fatal to the session.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider temporarily disabled after repeated failures (retry in {remaining_secs}s)")]
    CircuitBreakerTripped { remaining_secs: u64 },

    #[error("cannot read saved rate payload {path}: {reason}")]
    File { path: String, reason: String },

    #[error("rate provider error: {0}")]
    Other(String),
}

/// Where a rate series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    BancoCentral,
    File,
    Cache,
    /// Served from an expired cache entry because a refresh failed.
    StaleCache,
}

/// A successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub series: RateSeries,
    pub source: RateSource,
}

/// Trait for benchmark rate providers.
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the full rate history.
    fn fetch(&self) -> Result<FetchResult, RateError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}

/// Outcome of a fetch at the presentation boundary: never an `Err`.
///
/// On failure `series` is empty and `error` carries the message to show.
#[derive(Debug)]
pub struct RateFetchOutcome {
    pub series: RateSeries,
    pub source: Option<RateSource>,
    pub error: Option<RateError>,
}

impl RateFetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetch rates, converting any failure into an empty series plus the error.
pub fn fetch_rates_or_empty(provider: &dyn RateProvider) -> RateFetchOutcome {
    match provider.fetch() {
        Ok(result) => {
            tracing::debug!(
                provider = provider.name(),
                quotes = result.series.len(),
                source = ?result.source,
                "rate series loaded"
            );
            RateFetchOutcome {
                series: result.series,
                source: Some(result.source),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "rate fetch failed");
            RateFetchOutcome {
                series: RateSeries::empty(),
                source: None,
                error: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RateQuote;
    use chrono::NaiveDate;

    struct Failing;

    impl RateProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn fetch(&self) -> Result<FetchResult, RateError> {
            Err(RateError::NetworkUnreachable("connection refused".into()))
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct Fixed;

    impl RateProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn fetch(&self) -> Result<FetchResult, RateError> {
            Ok(FetchResult {
                series: RateSeries::new(vec![RateQuote {
                    start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    end: None,
                    annual_rate_pct: 10.5,
                }]),
                source: RateSource::File,
            })
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn failure_becomes_empty_series_with_error() {
        let outcome = fetch_rates_or_empty(&Failing);
        assert!(!outcome.is_ok());
        assert!(outcome.series.is_empty());
        assert!(outcome.source.is_none());
        assert!(outcome
            .error
            .unwrap()
            .to_string()
            .contains("connection refused"));
    }

    #[test]
    fn success_passes_series_through() {
        let outcome = fetch_rates_or_empty(&Fixed);
        assert!(outcome.is_ok());
        assert_eq!(outcome.series.len(), 1);
        assert_eq!(outcome.source, Some(RateSource::File));
    }
}
