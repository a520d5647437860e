//! User-supplied inputs for one goal projection run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scalars the user sets on the goal screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInputs {
    /// First day of the goal year; the baseline is the last data point on or before it.
    pub goal_start: NaiveDate,
    pub fixed_costs: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    /// Annual rate in percent. `None` uses the benchmark rate in effect at `goal_start`.
    #[serde(default)]
    pub annual_rate: Option<f64>,
    /// Stipulated annual goal. `None` uses the computed annual potential.
    #[serde(default)]
    pub annual_goal: Option<f64>,
}

impl GoalInputs {
    pub fn new(goal_start: NaiveDate, fixed_costs: f64, gross_salary: f64, net_salary: f64) -> Self {
        Self {
            goal_start,
            fixed_costs,
            gross_salary,
            net_salary,
            annual_rate: None,
            annual_goal: None,
        }
    }

    pub fn with_annual_rate(mut self, rate_pct: f64) -> Self {
        self.annual_rate = Some(rate_pct);
        self
    }

    pub fn with_annual_goal(mut self, goal: f64) -> Self {
        self.annual_goal = Some(goal);
        self
    }

    /// Net salary left after fixed costs, per month.
    pub fn monthly_surplus(&self) -> f64 {
        self.net_salary - self.fixed_costs
    }
}
