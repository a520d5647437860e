//! Data ingestion: CSV upload, institution pivot, benchmark rate providers.

pub mod bcb;
pub mod circuit_breaker;
pub mod ingest;
pub mod pivot;
pub mod provider;
pub mod rate_cache;

pub use bcb::{parse_payload, BcbFileProvider, BcbProvider};
pub use circuit_breaker::CircuitBreaker;
pub use ingest::{parse_records, read_records, read_records_from_path, InputError};
pub use pivot::{InstitutionPivot, InstitutionShare, PivotRow};
pub use provider::{
    fetch_rates_or_empty, FetchResult, RateError, RateFetchOutcome, RateProvider, RateSource,
};
pub use rate_cache::CachedRateProvider;
