//! Net-worth core: records, consolidated statistics, benchmark rates, goal projection.
//!
//! This crate contains everything behind the dashboard screens:
//! - Domain types (records, rate quotes, goal inputs)
//! - CSV ingest and the date × institution pivot
//! - StatsEngine: per-date totals with trailing 6/12/24-row trend, accumulation and growth
//! - Benchmark rate providers (central bank endpoint, saved payload) behind a TTL cache
//! - GoalProjector: savings potential, annual goal and the 12-month projection table
//! - Session: recompute-on-change holder for one user's upload

pub mod config;
pub mod data;
pub mod domain;
pub mod goal;
pub mod session;
pub mod stats;

pub use config::{Config, ConfigError, GoalDefaults, RatesConfig};
pub use session::{LoadStatus, Session};
