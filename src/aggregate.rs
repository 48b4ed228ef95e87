use std::collections::HashSet;
use std::env;

use crate::ledger::DedupLedger;
use crate::record::{MatchRecord, Outcome};
use crate::state::{HistoryEntry, TeamState, TeamStore};

/// How the bounded history window behaves when a loss ends an unbeaten run.
/// `TruncateOnly` keeps the window and lets truncation shrink it;
/// `ResetOnBreak` restarts the window at the streak-breaking match and tracks
/// that match as `last_streak_match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    TruncateOnly,
    ResetOnBreak,
}

impl HistoryMode {
    /// `FORMBOOK_HISTORY_MODE`: `reset` selects `ResetOnBreak`, anything
    /// else (including unset) the default.
    pub fn from_env() -> Self {
        match env::var("FORMBOOK_HISTORY_MODE") {
            Ok(raw) if raw.trim().eq_ignore_ascii_case("reset") => HistoryMode::ResetOnBreak,
            _ => HistoryMode::TruncateOnly,
        }
    }
}

/// The aggregation context: team store plus per-match dedup ledger, owned by
/// exactly one pass at a time. Matches must be fed in non-decreasing date
/// order; the fold is order-dependent.
#[derive(Debug, Default)]
pub struct Aggregator {
    teams: TeamStore,
    dedup: DedupLedger,
    mode: HistoryMode,
    applied: u64,
    duplicates: u64,
}

impl Aggregator {
    pub fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Continues from a previously persisted store.
    pub fn resume(teams: TeamStore, mode: HistoryMode) -> Self {
        Self {
            teams,
            mode,
            ..Self::default()
        }
    }

    pub fn teams(&self) -> &TeamStore {
        &self.teams
    }

    pub fn into_teams(self) -> TeamStore {
        self.teams
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Marks an identity as already aggregated without touching team state.
    /// Used when resuming: the archive is replayed into the ledger so that
    /// overlapping fetch windows stay idempotent across runs.
    pub fn preseed(&mut self, record: &MatchRecord) {
        self.dedup.record(record.identity());
    }

    /// Folds one match into both participants' state. Returns false for a
    /// duplicate identity, which is ignored rather than treated as an error.
    pub fn apply(&mut self, record: &MatchRecord) -> bool {
        if !self.dedup.record(record.identity()) {
            self.duplicates += 1;
            return false;
        }

        let home_entry = HistoryEntry {
            date: record.date,
            outcome: record.home_outcome().letter(),
            opponent: record.away_team.clone(),
            own_score: record.home_score,
            opponent_score: record.away_score,
        };
        let away_entry = HistoryEntry {
            date: record.date,
            outcome: record.away_outcome().letter(),
            opponent: record.home_team.clone(),
            own_score: record.away_score,
            opponent_score: record.home_score,
        };

        apply_result(
            self.teams.entry_mut(&record.home_team),
            record.home_outcome(),
            home_entry,
            self.mode,
        );
        apply_result(
            self.teams.entry_mut(&record.away_team),
            record.away_outcome(),
            away_entry,
            self.mode,
        );
        self.applied += 1;
        true
    }
}

/// The per-side streak transition, shared by home and away.
fn apply_result(state: &mut TeamState, outcome: Outcome, entry: HistoryEntry, mode: HistoryMode) {
    match outcome {
        Outcome::Win => {
            state.winstreak += 1;
            state.losestreak = 0;
            state.games_without_win = 0;
            state.games_without_loss += 1;
            if mode == HistoryMode::ResetOnBreak {
                // Anchor of the still-open without-loss run.
                state.last_streak_match = Some(entry.clone());
            }
        }
        Outcome::Loss => {
            let breaks_unbeaten_run = state.games_without_loss > 0;
            state.losestreak += 1;
            state.winstreak = 0;
            state.games_without_win += 1;
            state.games_without_loss = 0;
            if mode == HistoryMode::ResetOnBreak && breaks_unbeaten_run {
                // The window restarts where the unbeaten run ended.
                state.last_matches_with_opponents.clear();
                state.last_streak_match = Some(entry.clone());
            }
        }
        Outcome::Draw => {
            state.winstreak = 0;
            state.losestreak = 0;
            state.games_without_win += 1;
            state.games_without_loss += 1;
        }
    }

    state.last_matches_with_opponents.push(entry.summary());
    truncate_history(
        &mut state.last_matches_with_opponents,
        state.games_without_win,
        state.games_without_loss,
    );

    debug_assert!(state.winstreak == 0 || state.losestreak == 0);
    debug_assert!(
        state.last_matches_with_opponents.len()
            <= state.games_without_win.max(state.games_without_loss).max(1) as usize
    );
}

/// Bounds a history list to the last `max(without_win, without_loss, 1)`
/// entries, then drops exact-string repeats keeping first occurrences.
pub fn truncate_history(history: &mut Vec<String>, without_win: u32, without_loss: u32) {
    let keep = without_win.max(without_loss).max(1) as usize;
    if history.len() > keep {
        history.drain(..history.len() - keep);
    }
    let mut seen = HashSet::new();
    history.retain(|line| seen.insert(line.clone()));
}

#[cfg(test)]
mod tests {
    use super::truncate_history;

    #[test]
    fn truncate_keeps_tail_and_dedups() {
        let mut history = vec![
            "w vs A".to_string(),
            "d vs B".to_string(),
            "w vs A".to_string(),
            "l vs C".to_string(),
        ];
        truncate_history(&mut history, 2, 0);
        assert_eq!(history, vec!["w vs A".to_string(), "l vs C".to_string()]);
    }

    #[test]
    fn truncate_keeps_at_least_one() {
        let mut history = vec!["w vs A".to_string(), "w vs B".to_string()];
        truncate_history(&mut history, 0, 0);
        assert_eq!(history, vec!["w vs B".to_string()]);
    }
}
