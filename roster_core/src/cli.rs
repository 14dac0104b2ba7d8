use chrono::{Datelike, Local, NaiveDate};
use std::env;
use std::time::Duration;

use crate::config::{RosterConfig, SolverMode};

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub config: RosterConfig,
}

/// Parses command-line arguments to set:
/// - the scheduling period via --start=YYYY-MM-DD and --end=YYYY-MM-DD
///   (defaults to the current calendar month)
/// - the solver budget via --timeout=SECS
/// - the fallback draw seed via --seed=N
/// - fallback-only mode via --fallback-only
/// - debug tracing via --debug
pub fn parse_options_from_args() -> CliOptions {
    let args: Vec<String> = env::args().collect();
    let mut config = RosterConfig::default();

    let today = Local::now().date_naive();
    let mut start = today.with_day(1).unwrap_or(today);
    let mut end = last_day_of_month(start);

    if let Some(date) = arg_value(&args, "--start=").and_then(parse_date) {
        start = date;
    }
    if let Some(date) = arg_value(&args, "--end=").and_then(parse_date) {
        end = date;
    }
    if let Some(secs) = arg_value(&args, "--timeout=").and_then(|s| s.parse::<u64>().ok()) {
        config.solver_timeout = Duration::from_secs(secs);
    }
    if let Some(seed) = arg_value(&args, "--seed=").and_then(|s| s.parse::<u64>().ok()) {
        config.seed = Some(seed);
    }
    if args.iter().any(|a| a == "--fallback-only") {
        config.mode = SolverMode::FallbackOnly;
    }
    if args.iter().any(|a| a == "--debug") {
        config.debug = true;
    }

    CliOptions { start, end, config }
}

fn arg_value(args: &[String], prefix: &str) -> Option<String> {
    args.iter()
        .find(|a| a.starts_with(prefix))
        .and_then(|a| a.strip_prefix(prefix))
        .map(|s| s.to_string())
}

fn parse_date(s: String) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_day_handles_year_end() {
        let dec = NaiveDate::from_ymd_opt(2026, 12, 5).unwrap();
        assert_eq!(
            last_day_of_month(dec),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
        let feb = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(
            last_day_of_month(feb),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }
}
