use anyhow::Result;
use chrono::NaiveDate;

use crate::aggregate::{Aggregator, HistoryMode};
use crate::archive;
use crate::config::DataPaths;
use crate::fetch;
use crate::ledger::ProcessedDates;
use crate::record::{self, ParseOutcome, RawEvent};
use crate::skiplog::{REASON_UNPLAYED, SkipLog};
use crate::state::TeamStore;

#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    pub dates_fetched: usize,
    pub dates_already_processed: usize,
    pub dates_failed: usize,
    pub matches_applied: u64,
    pub matches_skipped: u64,
    pub duplicates: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayStats {
    pub applied: u64,
    pub skipped: u64,
    pub duplicates: u64,
}

/// Fetches and aggregates the given dates, skipping dates already marked
/// processed. Per date: fetch, classify, aggregate, write the day's archive
/// file, save the store, mark the date processed.
pub fn update_dates(
    paths: &DataPaths,
    dates: &[NaiveDate],
    mode: HistoryMode,
) -> Result<UpdateSummary> {
    update_dates_with(paths, dates, mode, fetch::fetch_scheduled_events)
}

/// Same as [`update_dates`] with the fetcher supplied by the caller, so the
/// drive logic is testable without a network edge.
pub fn update_dates_with(
    paths: &DataPaths,
    dates: &[NaiveDate],
    mode: HistoryMode,
    fetch_day: impl Fn(NaiveDate) -> Result<Vec<RawEvent>>,
) -> Result<UpdateSummary> {
    let teams = TeamStore::load(&paths.teams_file())?;
    let mut processed = ProcessedDates::load(&paths.processed_file());
    let mut agg = Aggregator::resume(teams, mode);
    seed_ledger_from_archive(&mut agg, paths)?;
    let skip_log = SkipLog::new(paths.skip_log());

    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut summary = UpdateSummary::default();
    for date in sorted {
        if processed.contains(date) {
            summary.dates_already_processed += 1;
            continue;
        }
        let events = match fetch_day(date) {
            Ok(events) => events,
            Err(err) => {
                // Left unmarked so the date is retried on the next run.
                eprintln!("[WARN] fetch failed for {date}: {err:#}");
                summary.dates_failed += 1;
                continue;
            }
        };

        let stats = ingest_day(&mut agg, paths, &skip_log, date, events)?;
        summary.dates_fetched += 1;
        summary.matches_applied += stats.applied;
        summary.matches_skipped += stats.skipped;
        summary.duplicates += stats.duplicates;

        agg.teams().save(&paths.teams_file())?;
        // Any successful fetch marks the date, zero events included; an
        // empty day is "no matches", not a failure.
        processed.mark(date);
        processed.save(&paths.processed_file())?;
    }
    Ok(summary)
}

/// Aggregates one day's raw events and writes the day's archive file. Played
/// matches are archived as fetched, duplicates included; the rebuild path
/// runs them through the same ledger, so both paths converge on one state.
pub fn ingest_day(
    agg: &mut Aggregator,
    paths: &DataPaths,
    skip_log: &SkipLog,
    date: NaiveDate,
    events: Vec<RawEvent>,
) -> Result<DayStats> {
    let applied_before = agg.applied();
    let duplicates_before = agg.duplicates();
    let mut played = Vec::new();
    let mut skipped = 0u64;

    for event in events {
        match record::classify(event, Some(date)) {
            ParseOutcome::Played(record) => {
                agg.apply(&record);
                played.push(record);
            }
            ParseOutcome::Unplayed {
                home_team,
                away_team,
            } => {
                skip_log.record(date, &home_team, &away_team, REASON_UNPLAYED);
                skipped += 1;
            }
            ParseOutcome::Malformed(reason) => {
                skip_log.record(date, "?", "?", &reason);
                skipped += 1;
            }
        }
    }

    archive::write_day(&paths.dir, date, &played)?;
    Ok(DayStats {
        applied: agg.applied() - applied_before,
        skipped,
        duplicates: agg.duplicates() - duplicates_before,
    })
}

/// Replays the existing archive into the dedup ledger only. Team state was
/// already folded from those matches on earlier runs; re-marking their
/// identities keeps overlapping date windows at-most-once.
fn seed_ledger_from_archive(agg: &mut Aggregator, paths: &DataPaths) -> Result<()> {
    for date in archive::available_dates(&paths.dir)? {
        for outcome in archive::read_day(&paths.dir, date)? {
            if let ParseOutcome::Played(record) = outcome {
                agg.preseed(&record);
            }
        }
    }
    Ok(())
}
