//! Plain-text rendering of the dashboard views.

use networth_core::data::{InstitutionPivot, InstitutionShare, RateFetchOutcome};
use networth_core::domain::{RateSeries, Record};
use networth_core::goal::{GoalProjection, ProjectionTable, RateOrigin};
use networth_core::stats::{ConsolidatedSeries, StatColumn};

const NA: &str = "N/A";

/// `R$ 1234.56`, or `N/A` for missing and non-finite values.
pub fn currency(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("R$ {v:.2}"),
        _ => NA.into(),
    }
}

/// Ratio as a percentage: `0.1` → `10.00%`.
pub fn percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => NA.into(),
    }
}

fn cell(column: StatColumn, value: Option<f64>) -> String {
    if column.is_ratio() {
        percent(value)
    } else {
        currency(value)
    }
}

pub fn print_records(records: &[Record]) {
    println!("{:<12} {:<24} {:>16}", "Date", "Institution", "Value");
    println!("{}", "-".repeat(54));
    for r in records {
        println!(
            "{:<12} {:<24} {:>16}",
            r.date.format("%d/%m/%Y"),
            r.institution,
            currency(Some(r.value))
        );
    }
    println!();
    println!("{} records", records.len());
}

pub fn print_pivot(pivot: &InstitutionPivot) {
    let header: Vec<String> = pivot
        .institutions()
        .iter()
        .map(|name| format!("{name:>18}"))
        .collect();
    println!("{:<12}{}", "Date", header.join(""));
    println!("{}", "-".repeat(12 + 18 * pivot.institutions().len()));
    for row in pivot.rows() {
        let cells: Vec<String> = row
            .values
            .iter()
            .map(|v| format!("{:>18}", currency(*v)))
            .collect();
        println!("{:<12}{}", row.date.format("%d/%m/%Y"), cells.join(""));
    }
}

pub fn print_distribution(date: chrono::NaiveDate, shares: &[InstitutionShare]) {
    println!("Distribution on {}", date.format("%d/%m/%Y"));
    println!("{:<24} {:>16} {:>10}", "Institution", "Value", "Share");
    println!("{}", "-".repeat(52));
    for s in shares {
        println!(
            "{:<24} {:>16} {:>10}",
            s.institution,
            currency(Some(s.value)),
            percent(Some(s.share))
        );
    }
}

fn print_columns(series: &ConsolidatedSeries, columns: &[StatColumn]) {
    let header: Vec<String> = columns.iter().map(|c| format!("{:>16}", c.label())).collect();
    println!("{:<12}{}", "Date", header.join(""));
    println!("{}", "-".repeat(12 + 16 * columns.len()));
    for row in series.rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|&c| format!("{:>16}", cell(c, row.get(c))))
            .collect();
        println!("{:<12}{}", row.date.format("%d/%m/%Y"), cells.join(""));
    }
}

pub fn print_stats(series: &ConsolidatedSeries) {
    println!("--- Absolute ---");
    print_columns(series, &StatColumn::ABSOLUTE);
    println!();
    println!("--- Relative ---");
    print_columns(series, &StatColumn::RELATIVE);
}

pub fn print_rates(outcome: &RateFetchOutcome) {
    if let Some(source) = outcome.source {
        println!("Source: {source:?}");
    }
    print_rate_series(&outcome.series);
}

fn print_rate_series(series: &RateSeries) {
    println!("{:<12} {:<12} {:>10}", "Start", "End", "Rate");
    println!("{}", "-".repeat(36));
    for q in series.quotes() {
        let end = q
            .end
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "current".into());
        println!(
            "{:<12} {:<12} {:>9.2}%",
            q.start.format("%d/%m/%Y"),
            end,
            q.annual_rate_pct
        );
    }
}

pub fn print_goal_summary(p: &GoalProjection) {
    let origin = match p.rate_origin {
        RateOrigin::UserInput => "user input".to_string(),
        RateOrigin::Benchmark { overlapping: 0 } => "SELIC target".to_string(),
        RateOrigin::Benchmark { overlapping } => {
            format!("SELIC target ({overlapping} overlapping quotes ignored)")
        }
    };

    println!("=== Goal ===");
    println!("Goal start:        {}", p.goal_start.format("%d/%m/%Y"));
    println!(
        "Baseline:          {} on {}",
        currency(Some(p.baseline_value)),
        p.baseline_date.format("%d/%m/%Y")
    );
    println!("Annual rate:       {:.2}% ({origin})", p.annual_rate_pct);
    println!("Monthly rate:      {:.4}%", p.monthly_rate * 100.0);
    println!();
    println!("--- Expected yield ---");
    println!("Monthly interest:  {}", currency(Some(p.monthly_interest)));
    println!("Annual interest:   {}", currency(Some(p.annual_interest)));
    println!();
    println!("--- Potential ---");
    println!("Monthly:           {}", currency(Some(p.monthly_potential)));
    println!("Annual:            {}", currency(Some(p.annual_potential)));
    println!("Annual goal:       {}", currency(Some(p.annual_goal)));
    println!("Final projected:   {}", currency(Some(p.final_projected_value)));
}

pub fn print_projection_table(table: &ProjectionTable) {
    println!(
        "{:<8} {:>16} {:>16} {:>16} {:>12} {:>12} {:>12}",
        "Month", "Target", "Actual", "Difference", "% Month", "% Year", "% Expected"
    );
    println!("{}", "-".repeat(98));
    for row in table.rows() {
        println!(
            "{:<8} {:>16} {:>16} {:>16} {:>12} {:>12} {:>12}",
            row.month_label(),
            currency(Some(row.target)),
            currency(row.actual),
            currency(row.difference),
            percent(row.pct_of_monthly_target),
            percent(row.pct_of_annual_actual),
            percent(Some(row.pct_of_annual_expected)),
        );
    }
}
