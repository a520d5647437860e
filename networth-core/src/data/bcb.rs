//! Banco Central do Brasil SELIC history provider.
//!
//! Fetches the COPOM target-rate history. Each entry of the `conteudo` array
//! carries the validity start, an optional end (null while the rate is still
//! in effect) and the target rate in percent. Handles retries with
//! exponential backoff, response parsing, and the circuit breaker.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{FetchResult, RateError, RateProvider, RateSource};
use crate::config::RatesConfig;
use crate::domain::{RateQuote, RateSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://www.bcb.gov.br/api/servico/sitebcb/historicotaxasjuros";

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    conteudo: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryEntry {
    data_inicio_vigencia: String,
    #[serde(default)]
    data_fim_vigencia: Option<String>,
    #[serde(default)]
    meta_selic: Option<f64>,
}

/// Provider timestamps look like `2023-08-03T00:00:00` (sometimes with an offset);
/// only the calendar date matters.
fn parse_provider_date(raw: &str) -> Result<NaiveDate, RateError> {
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| RateError::ResponseFormatChanged(format!("invalid date: {raw}")))
}

/// Parse a `historicotaxasjuros` JSON document into a rate series (source order kept).
pub fn parse_payload(json: &str) -> Result<RateSeries, RateError> {
    let resp: HistoryResponse = serde_json::from_str(json)
        .map_err(|e| RateError::ResponseFormatChanged(format!("unexpected payload: {e}")))?;
    series_from_response(resp)
}

fn series_from_response(resp: HistoryResponse) -> Result<RateSeries, RateError> {
    let mut quotes = Vec::with_capacity(resp.conteudo.len());

    for entry in resp.conteudo {
        let start = parse_provider_date(&entry.data_inicio_vigencia)?;
        // DataFimVigencia is the last day in force; quotes store the exclusive end.
        let end = entry
            .data_fim_vigencia
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_provider_date)
            .transpose()?
            .map(|last_day| last_day.succ_opt().unwrap_or(NaiveDate::MAX));

        let Some(annual_rate_pct) = entry.meta_selic else {
            tracing::warn!(%start, "rate entry without MetaSelic skipped");
            continue;
        };

        quotes.push(RateQuote {
            start,
            end,
            annual_rate_pct,
        });
    }

    if quotes.is_empty() {
        return Err(RateError::ResponseFormatChanged(
            "no rate quotes in response".into(),
        ));
    }

    Ok(RateSeries::new(quotes))
}

/// Exponential backoff before retry `attempt` (1-based), saturating on huge retry counts.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor)
}

/// HTTP provider for the central bank endpoint.
pub struct BcbProvider {
    client: reqwest::blocking::Client,
    url: String,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl BcbProvider {
    pub fn new(config: &RatesConfig, circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, RateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RateError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            circuit_breaker,
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        })
    }

    fn breaker_error(&self) -> RateError {
        RateError::CircuitBreakerTripped {
            remaining_secs: self.circuit_breaker.remaining_cooldown().as_secs(),
        }
    }

    /// Execute the request with retry and circuit breaker logic.
    fn fetch_with_retry(&self) -> Result<RateSeries, RateError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(self.breaker_error());
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.base_delay, attempt);
                tracing::debug!(attempt, ?delay, "retrying rate fetch");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(self.breaker_error());
            }

            match self.client.get(&self.url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        self.circuit_breaker.trip();
                        return Err(RateError::HttpStatus {
                            status: status.as_u16(),
                        });
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(RateError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(RateError::HttpStatus {
                            status: status.as_u16(),
                        });
                        continue;
                    }

                    let body: HistoryResponse = resp.json().map_err(|e| {
                        RateError::ResponseFormatChanged(format!("failed to parse response: {e}"))
                    })?;

                    let series = series_from_response(body)?;
                    self.circuit_breaker.record_success();
                    return Ok(series);
                }
                Err(e) => {
                    self.circuit_breaker.record_failure();
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(RateError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(RateError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RateError::Other("max retries exceeded".into())))
    }
}

impl RateProvider for BcbProvider {
    fn name(&self) -> &str {
        "banco_central"
    }

    fn fetch(&self) -> Result<FetchResult, RateError> {
        let series = self.fetch_with_retry()?;
        Ok(FetchResult {
            series,
            source: RateSource::BancoCentral,
        })
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}

/// Reads a previously saved `historicotaxasjuros` payload from disk (offline use).
pub struct BcbFileProvider {
    path: PathBuf,
}

impl BcbFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateProvider for BcbFileProvider {
    fn name(&self) -> &str {
        "saved_payload"
    }

    fn fetch(&self) -> Result<FetchResult, RateError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| RateError::File {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(FetchResult {
            series: parse_payload(&json)?,
            source: RateSource::File,
        })
    }

    fn is_available(&self) -> bool {
        self.path.exists()
    }
}
