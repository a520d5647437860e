//! Domain types for the net-worth dashboard.

pub mod goal;
pub mod rate;
pub mod record;

pub use goal::GoalInputs;
pub use rate::{RateQuote, RateSeries};
pub use record::{sort_for_display, Record};
