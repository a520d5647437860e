//! Net-worth CLI: render the dashboard views for one CSV upload.
//!
//! Commands:
//! - `raw`: the records as parsed
//! - `institutions`: date × institution pivot, or one date's distribution
//! - `stats`: consolidated series with trend and growth windows
//! - `rates`: the SELIC target history
//! - `goal`: savings potential, annual goal and the 12-month projection
//!
//! Each invocation fetches the rate history once and exits, so rates go
//! straight to the provider without the in-memory TTL cache.

mod render;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use networth_core::data::{
    fetch_rates_or_empty, BcbFileProvider, BcbProvider, CircuitBreaker, RateFetchOutcome,
    RateProvider,
};
use networth_core::domain::GoalInputs;
use networth_core::{Config, Session};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "networth",
    about = "Net-worth dashboard: statistics and goal tracking from a CSV"
)]
struct Cli {
    /// CSV with columns Data, Instituição, Valor.
    #[arg(long, global = true, default_value = "patrimonio.csv")]
    file: PathBuf,

    /// TOML config file. Missing file means defaults.
    #[arg(long, global = true, default_value = "networth.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the records as parsed, sorted by date and institution.
    Raw,
    /// Show the date × institution pivot.
    Institutions {
        /// Show the per-institution distribution on this date (DD/MM/YYYY) instead.
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the consolidated series with trend and growth windows.
    Stats {
        /// First date to show (DD/MM/YYYY).
        #[arg(long)]
        from: Option<String>,

        /// Last date to show (DD/MM/YYYY).
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the SELIC target history.
    Rates {
        /// Read a saved provider payload instead of calling the API.
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },
    /// Project the annual goal and compare it with the data month by month.
    Goal {
        /// Goal start (DD/MM/YYYY). Defaults to the last date in the file.
        #[arg(long)]
        start: Option<String>,

        /// Monthly fixed costs.
        #[arg(long)]
        fixed_costs: Option<f64>,

        /// Monthly gross salary.
        #[arg(long)]
        gross_salary: Option<f64>,

        /// Monthly net salary.
        #[arg(long)]
        net_salary: Option<f64>,

        /// Annual rate in percent. Defaults to the SELIC target at the goal start.
        #[arg(long)]
        rate: Option<f64>,

        /// Stipulated annual goal. Defaults to the computed annual potential.
        #[arg(long)]
        goal: Option<f64>,

        /// Read a saved provider payload instead of calling the API.
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(Some(&cli.config))
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Raw => {
            let session = load_session(&cli.file)?;
            render::print_records(session.records());
            Ok(())
        }
        Commands::Institutions { date } => run_institutions(&cli.file, date.as_deref()),
        Commands::Stats { from, to } => run_stats(&cli.file, from.as_deref(), to.as_deref()),
        Commands::Rates { rates_file } => {
            let outcome = fetch_rates(&config, rates_file.as_deref())?;
            report_rate_error(&outcome);
            render::print_rates(&outcome);
            Ok(())
        }
        Commands::Goal {
            start,
            fixed_costs,
            gross_salary,
            net_salary,
            rate,
            goal,
            rates_file,
        } => {
            let session = load_session(&cli.file)?;
            let goal_start = match start.as_deref() {
                Some(s) => parse_date(s)?,
                None => match session.series().last_date() {
                    Some(d) => d,
                    None => bail!("{} has no data", cli.file.display()),
                },
            };

            let defaults = &config.goal;
            let mut inputs = GoalInputs::new(
                goal_start,
                fixed_costs.unwrap_or(defaults.fixed_costs),
                gross_salary.unwrap_or(defaults.gross_salary),
                net_salary.unwrap_or(defaults.net_salary),
            );
            inputs.annual_rate = rate.or(defaults.annual_rate);
            inputs.annual_goal = goal.or(defaults.annual_goal);

            run_goal_cmd(&session, &inputs, &config, rates_file.as_deref())
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .with_context(|| format!("invalid date '{s}' (expected DD/MM/YYYY)"))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn load_session(path: &Path) -> Result<Session> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut session = Session::new();
    session
        .load(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(session)
}

fn run_institutions(file: &Path, date: Option<&str>) -> Result<()> {
    let session = load_session(file)?;
    let pivot = session.pivot();

    match date {
        Some(s) => {
            let date = parse_date(s)?;
            let Some(shares) = pivot.distribution(date) else {
                bail!("no records on {s}");
            };
            render::print_distribution(date, &shares);
        }
        None => render::print_pivot(pivot),
    }
    Ok(())
}

fn run_stats(file: &Path, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let session = load_session(file)?;
    let series = session.series();
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        bail!("{} has no data", file.display());
    };

    let start = from.map(parse_date).transpose()?.unwrap_or(first);
    let end = to.map(parse_date).transpose()?.unwrap_or(last);
    if start > end {
        bail!("--from must not be after --to");
    }

    render::print_stats(&series.between(start, end));
    Ok(())
}

fn rate_provider(config: &Config, rates_file: Option<&Path>) -> Result<Box<dyn RateProvider>> {
    let provider: Box<dyn RateProvider> = match rates_file {
        Some(path) => Box::new(BcbFileProvider::new(path)),
        None => {
            let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
            Box::new(BcbProvider::new(&config.rates, circuit_breaker)?)
        }
    };
    Ok(provider)
}

fn fetch_rates(config: &Config, rates_file: Option<&Path>) -> Result<RateFetchOutcome> {
    let provider = rate_provider(config, rates_file)?;
    Ok(fetch_rates_or_empty(provider.as_ref()))
}

fn report_rate_error(outcome: &RateFetchOutcome) {
    if let Some(err) = &outcome.error {
        eprintln!("WARNING: could not load the SELIC history: {err}");
    }
}

fn run_goal_cmd(
    session: &Session,
    inputs: &GoalInputs,
    config: &Config,
    rates_file: Option<&Path>,
) -> Result<()> {
    let outcome = if inputs.annual_rate.is_some() {
        None
    } else {
        let outcome = fetch_rates(config, rates_file)?;
        report_rate_error(&outcome);
        Some(outcome)
    };
    let rates = outcome.map(|o| o.series).unwrap_or_default();

    let report = session.goal(inputs, &rates, today())?;

    render::print_goal_summary(&report.projection);
    println!();
    render::print_projection_table(&report.table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use networth_core::data::RateSource;

    fn saved_payload() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../networth-core/tests/fixtures/selic_history.json")
    }

    #[test]
    fn provider_is_chosen_by_flag_without_cache() {
        let config = Config::default();
        assert_eq!(rate_provider(&config, None).unwrap().name(), "banco_central");
        let file = rate_provider(&config, Some(saved_payload().as_path())).unwrap();
        assert_eq!(file.name(), "saved_payload");
        // a cached provider would answer the second call from memory
        assert_eq!(file.fetch().unwrap().source, RateSource::File);
        assert_eq!(file.fetch().unwrap().source, RateSource::File);
    }

    #[test]
    fn saved_payload_is_read_directly() {
        let outcome = fetch_rates(&Config::default(), Some(saved_payload().as_path())).unwrap();
        assert!(outcome.is_ok());
        assert_eq!(outcome.source, Some(RateSource::File));
        assert_eq!(outcome.series.len(), 5);
    }

    #[test]
    fn dates_use_day_first_format() {
        assert_eq!(
            parse_date("08/05/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()
        );
        assert!(parse_date("2024-05-08").is_err());
    }
}
