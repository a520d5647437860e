//! In-memory TTL cache in front of a rate provider.
//!
//! The benchmark rate changes a few times a year, so one fetch per day is
//! plenty. When a refresh fails and an expired entry exists, the expired
//! series is served (tagged `StaleCache`) instead of failing the goal screen.
//! Nothing is written to disk, so the cache only pays off in a long-lived
//! host that keeps one provider across requests; a one-shot process should
//! call the provider directly.

use super::provider::{FetchResult, RateError, RateProvider, RateSource};
use crate::domain::RateSeries;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    series: RateSeries,
    fetched_at: Instant,
}

pub struct CachedRateProvider<P> {
    inner: P,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<P: RateProvider> CachedRateProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// 24-hour TTL.
    pub fn daily(inner: P) -> Self {
        Self::new(inner, Duration::from_secs(24 * 60 * 60))
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop the cached series so the next fetch goes to the provider.
    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Age of the cached series, if any.
    pub fn age(&self) -> Option<Duration> {
        self.entry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|e| e.fetched_at.elapsed())
    }
}

impl<P: RateProvider> RateProvider for CachedRateProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch(&self) -> Result<FetchResult, RateError> {
        // Held across the inner fetch so concurrent callers share one refresh.
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(FetchResult {
                    series: cached.series.clone(),
                    source: RateSource::Cache,
                });
            }
        }

        match self.inner.fetch() {
            Ok(result) => {
                *entry = Some(CacheEntry {
                    series: result.series.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(result)
            }
            Err(e) => match entry.as_ref() {
                Some(stale) => {
                    tracing::warn!(
                        error = %e,
                        age_secs = stale.fetched_at.elapsed().as_secs(),
                        "rate refresh failed, serving stale series"
                    );
                    Ok(FetchResult {
                        series: stale.series.clone(),
                        source: RateSource::StaleCache,
                    })
                }
                None => Err(e),
            },
        }
    }

    fn is_available(&self) -> bool {
        self.inner.is_available() || self.age().is_some()
    }
}
