use anyhow::Result;

use crate::aggregate::{Aggregator, HistoryMode};
use crate::archive;
use crate::config::DataPaths;
use crate::record::ParseOutcome;
use crate::skiplog::{REASON_UNPLAYED, SkipLog};

#[derive(Debug, Clone, Default)]
pub struct RebuildSummary {
    pub dates: usize,
    pub matches_applied: u64,
    pub matches_skipped: u64,
    pub duplicates: u64,
}

/// Regenerates the team-state snapshot purely from the per-day archive: the
/// store starts empty and every archived match replays through the dedup
/// ledger and aggregator in file-date order. The archive is the source of
/// truth; `teams.json` is a rebuildable cache.
pub fn rebuild(paths: &DataPaths, mode: HistoryMode) -> Result<RebuildSummary> {
    let dates = archive::available_dates(&paths.dir)?;
    let skip_log = SkipLog::new(paths.skip_log());
    let mut agg = Aggregator::new(mode);
    let mut skipped = 0u64;

    for date in &dates {
        for outcome in archive::read_day(&paths.dir, *date)? {
            match outcome {
                ParseOutcome::Played(record) => {
                    agg.apply(&record);
                }
                ParseOutcome::Unplayed {
                    home_team,
                    away_team,
                } => {
                    skip_log.record(*date, &home_team, &away_team, REASON_UNPLAYED);
                    skipped += 1;
                }
                ParseOutcome::Malformed(reason) => {
                    skip_log.record(*date, "?", "?", &reason);
                    skipped += 1;
                }
            }
        }
    }

    let summary = RebuildSummary {
        dates: dates.len(),
        matches_applied: agg.applied(),
        matches_skipped: skipped,
        duplicates: agg.duplicates(),
    };
    agg.teams().save(&paths.teams_file())?;
    Ok(summary)
}
