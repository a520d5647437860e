//! Trailing-window metrics over the consolidated value series.
//!
//! Windows count rows, not calendar months: a file with a missing month still
//! treats the surrounding rows as adjacent. Each metric returns one entry per
//! input row; rows without enough history are `None`.
//!
//! Non-finite results (a zero base in a ratio) are kept as `Some(inf)` or
//! `Some(NaN)` so they stay distinguishable from missing history.

/// Trailing windows reported for every row, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Window {
    Six,
    Twelve,
    TwentyFour,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::Six, Window::Twelve, Window::TwentyFour];

    pub fn len(self) -> usize {
        match self {
            Window::Six => 6,
            Window::Twelve => 12,
            Window::TwentyFour => 24,
        }
    }
}

/// A metric computed over a trailing window of the value series.
pub trait WindowMetric {
    /// Column name, e.g. `trend_6`.
    fn name(&self) -> String;

    /// Rows at the start of the series that are always `None`.
    fn lookback(&self) -> usize;

    /// Compute the metric for the whole series.
    fn compute(&self, values: &[f64]) -> Vec<Option<f64>>;
}

/// Mean of the row-over-row deltas inside the window.
///
/// The first delta is undefined, so the first valid row is `window`, not
/// `window - 1`.
#[derive(Debug, Clone, Copy)]
pub struct Trend(pub Window);

/// Endpoint difference: `V[i] - V[i-w+1]`.
#[derive(Debug, Clone, Copy)]
pub struct Accumulation(pub Window);

/// Endpoint ratio: `V[i] / V[i-w+1] - 1`.
#[derive(Debug, Clone, Copy)]
pub struct Growth(pub Window);

impl WindowMetric for Trend {
    fn name(&self) -> String {
        format!("trend_{}", self.0.len())
    }

    fn lookback(&self) -> usize {
        self.0.len()
    }

    fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let w = self.0.len();
        let n = values.len();
        let mut result = vec![None; n];
        if n <= w {
            return result;
        }

        let deltas: Vec<f64> = values.windows(2).map(|p| p[1] - p[0]).collect();
        // deltas[k] is the delta of row k + 1
        for i in w..n {
            let window = &deltas[(i - w)..i];
            result[i] = Some(window.iter().sum::<f64>() / w as f64);
        }
        result
    }
}

impl WindowMetric for Accumulation {
    fn name(&self) -> String {
        format!("accum_{}", self.0.len())
    }

    fn lookback(&self) -> usize {
        self.0.len() - 1
    }

    fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let lb = self.lookback();
        (0..values.len())
            .map(|i| (i >= lb).then(|| values[i] - values[i - lb]))
            .collect()
    }
}

impl WindowMetric for Growth {
    fn name(&self) -> String {
        format!("growth_{}", self.0.len())
    }

    fn lookback(&self) -> usize {
        self.0.len() - 1
    }

    fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let lb = self.lookback();
        (0..values.len())
            .map(|i| (i >= lb).then(|| values[i] / values[i - lb] - 1.0))
            .collect()
    }
}

/// Row-over-row difference; `None` at row 0.
pub fn deltas(values: &[f64]) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| (i > 0).then(|| values[i] - values[i - 1]))
        .collect()
}

/// Row-over-row relative change; `None` at row 0, non-finite after a zero.
pub fn pct_changes(values: &[f64]) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| (i > 0).then(|| values[i] / values[i - 1] - 1.0))
        .collect()
}
