//! StatsEngine: consolidated net-worth series and trailing-window analytics.

pub mod engine;
pub mod window;

pub use engine::{compute_stats, ConsolidatedSeries, StatColumn, StatsRow, WindowValues};
pub use window::{Accumulation, Growth, Trend, Window, WindowMetric};
