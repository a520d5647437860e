//! GoalProjector: savings potential, annual goal and the 12-month projection.

pub mod lookup;
pub mod projector;
pub mod table;

pub use lookup::{lookup_rate, RateMatch};
pub use projector::{monthly_rate_from_annual, project_goal, GoalProjection, RateOrigin};
pub use table::{build_projection_table, round2, ProjectionRow, ProjectionTable, PROJECTION_MONTHS};

use crate::domain::{GoalInputs, RateSeries};
use crate::stats::ConsolidatedSeries;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalError {
    #[error("no net-worth data on or before the goal start {goal_start}")]
    NoBaseline { goal_start: NaiveDate },

    #[error("no benchmark rate in effect on {date}")]
    RateLookupMiss { date: NaiveDate },

    #[error("benchmark rate series unavailable; enter the annual rate manually")]
    RateUnavailable,
}

/// Everything the goal screen shows for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalReport {
    pub projection: GoalProjection,
    pub table: ProjectionTable,
}

/// Project the goal and build its table in one call.
pub fn run_goal(
    series: &ConsolidatedSeries,
    inputs: &GoalInputs,
    rates: &RateSeries,
    today: NaiveDate,
) -> Result<GoalReport, GoalError> {
    let projection = project_goal(series, inputs, rates, today)?;
    let table = build_projection_table(
        series,
        projection.annual_goal,
        projection.baseline_date,
        projection.baseline_value,
    );
    Ok(GoalReport { projection, table })
}
