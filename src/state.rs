use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate record for one team. Field names match the on-disk `teams.json`
/// layout, so snapshots written by earlier tooling stay loadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub winstreak: u32,
    pub losestreak: u32,
    pub games_without_win: u32,
    pub games_without_loss: u32,
    #[serde(default)]
    pub last_matches_with_opponents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_streak_match: Option<HistoryEntry>,
}

/// Compact summary of one match from a team's own perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: Option<NaiveDate>,
    pub outcome: char,
    pub opponent: String,
    pub own_score: u32,
    pub opponent_score: u32,
}

impl HistoryEntry {
    /// The flat history-line form, e.g. `"w vs Arsenal"`.
    pub fn summary(&self) -> String {
        format!("{} vs {}", self.outcome, self.opponent)
    }
}

/// Team-name-to-state mapping, the durable ledger behind `teams.json`.
/// BTreeMap keeps snapshot key order stable across saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamStore {
    teams: BTreeMap<String, TeamState>,
}

impl TeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the team lazily on first appearance.
    pub fn entry_mut(&mut self, name: &str) -> &mut TeamState {
        self.teams.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&TeamState> {
        self.teams.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TeamState)> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Missing snapshot is an empty store; a present-but-invalid snapshot is
    /// an error rather than a silent reset.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read team store {}", path.display()));
            }
        };
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid team store json {}", path.display()))
    }

    /// Full overwrite on every save, via tmp+rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok();
        }
        let json = serde_json::to_string_pretty(self).context("serialize team store")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write team store")?;
        fs::rename(&tmp, path).context("swap team store")?;
        Ok(())
    }
}
