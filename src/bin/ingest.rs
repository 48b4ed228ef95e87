use anyhow::{Context, Result, anyhow};
use chrono::{Days, NaiveDate, Utc};

use formbook::aggregate::HistoryMode;
use formbook::config::DataPaths;
use formbook::update;

const MAX_RANGE_DAYS: u64 = 92;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let dates = parse_dates_args()?.unwrap_or_else(|| vec![Utc::now().date_naive()]);
    let paths = DataPaths::from_env();
    let mode = HistoryMode::from_env();

    let summary = update::update_dates(&paths, &dates, mode)?;

    println!("Ingest complete");
    println!("Data dir: {}", paths.dir.display());
    println!(
        "Dates: fetched {} / already processed {} / failed {}",
        summary.dates_fetched, summary.dates_already_processed, summary.dates_failed
    );
    println!(
        "Matches: applied {} / skipped {} / duplicates {}",
        summary.matches_applied, summary.matches_skipped, summary.duplicates
    );
    Ok(())
}

/// `--date=YYYY-MM-DD` (repeatable, comma lists accepted) or
/// `--from=YYYY-MM-DD --to=YYYY-MM-DD` for an inclusive range.
fn parse_dates_args() -> Result<Option<Vec<NaiveDate>>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut dates = Vec::new();
    let mut from = None;
    let mut to = None;

    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = value_of(arg, &args, idx, "--date") {
            for part in raw.split(',') {
                dates.push(parse_date(part)?);
            }
        }
        if let Some(raw) = value_of(arg, &args, idx, "--from") {
            from = Some(parse_date(&raw)?);
        }
        if let Some(raw) = value_of(arg, &args, idx, "--to") {
            to = Some(parse_date(&raw)?);
        }
    }

    match (from, to) {
        (Some(from), Some(to)) => {
            if from > to {
                return Err(anyhow!("--from {from} is after --to {to}"));
            }
            let span = (to - from).num_days() as u64;
            if span > MAX_RANGE_DAYS {
                return Err(anyhow!("range longer than {MAX_RANGE_DAYS} days"));
            }
            let mut date = from;
            while date <= to {
                dates.push(date);
                date = date
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| anyhow!("date overflow walking range"))?;
            }
        }
        (None, None) => {}
        _ => return Err(anyhow!("--from and --to must be given together")),
    }

    if dates.is_empty() { Ok(None) } else { Ok(Some(dates)) }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))
}

fn value_of(arg: &str, args: &[String], idx: usize, flag: &str) -> Option<String> {
    if let Some(raw) = arg.strip_prefix(&format!("{flag}=")) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if arg == flag
        && let Some(next) = args.get(idx + 1)
        && !next.trim().is_empty()
    {
        return Some(next.trim().to_string());
    }
    None
}
