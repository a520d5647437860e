//! Savings potential and the stipulated annual goal.

use super::lookup::lookup_rate;
use super::GoalError;
use crate::domain::{GoalInputs, RateSeries};
use crate::stats::ConsolidatedSeries;
use chrono::NaiveDate;
use serde::Serialize;

/// Where the annual rate used in a projection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateOrigin {
    /// Set explicitly in [`GoalInputs::annual_rate`].
    UserInput,
    /// Looked up in the benchmark series at the goal start.
    Benchmark { overlapping: usize },
}

/// Scalar summary of one goal projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub goal_start: NaiveDate,
    pub baseline_date: NaiveDate,
    pub baseline_value: f64,
    pub annual_rate_pct: f64,
    pub rate_origin: RateOrigin,
    pub monthly_rate: f64,
    /// Interest the baseline earns in one month at `monthly_rate`.
    pub monthly_interest: f64,
    /// Interest the baseline earns in one year at the annual rate.
    pub annual_interest: f64,
    pub monthly_potential: f64,
    pub annual_potential: f64,
    pub annual_goal: f64,
    pub final_projected_value: f64,
}

/// Effective monthly rate equivalent to an annual percentage, compounded.
pub fn monthly_rate_from_annual(annual_rate_pct: f64) -> f64 {
    (1.0 + annual_rate_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Anchor the goal on the last data point before it starts and size it.
///
/// `annual_potential` is twelve months of surplus plus ONE month of interest,
/// not twelve. Do not change it without confirming with the product owner.
pub fn project_goal(
    series: &ConsolidatedSeries,
    inputs: &GoalInputs,
    rates: &RateSeries,
    today: NaiveDate,
) -> Result<GoalProjection, GoalError> {
    let baseline = series
        .latest_on_or_before(inputs.goal_start)
        .ok_or(GoalError::NoBaseline {
            goal_start: inputs.goal_start,
        })?;

    let (annual_rate_pct, rate_origin) = match inputs.annual_rate {
        Some(rate) => (rate, RateOrigin::UserInput),
        None => {
            let m = lookup_rate(rates, inputs.goal_start, today)?;
            (
                m.annual_rate_pct(),
                RateOrigin::Benchmark {
                    overlapping: m.overlapping,
                },
            )
        }
    };

    let monthly_rate = monthly_rate_from_annual(annual_rate_pct);
    let monthly_interest = baseline.value * monthly_rate;
    let annual_interest = baseline.value * annual_rate_pct / 100.0;
    let surplus = inputs.monthly_surplus();

    let monthly_potential = surplus + monthly_interest;
    let annual_potential = 12.0 * surplus + monthly_interest;
    let annual_goal = inputs.annual_goal.unwrap_or(annual_potential);

    tracing::debug!(
        baseline_date = %baseline.date,
        baseline_value = baseline.value,
        annual_rate_pct,
        annual_goal,
        "goal projected"
    );

    Ok(GoalProjection {
        goal_start: inputs.goal_start,
        baseline_date: baseline.date,
        baseline_value: baseline.value,
        annual_rate_pct,
        rate_origin,
        monthly_rate,
        monthly_interest,
        annual_interest,
        monthly_potential,
        annual_potential,
        annual_goal,
        final_projected_value: annual_goal + baseline.value,
    })
}
