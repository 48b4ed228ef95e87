use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::record::MatchIdentity;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-match dedup set. Guarantees at-most-once aggregation per unique match
/// identity across repeated or overlapping runs.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashSet<MatchIdentity>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, identity: &MatchIdentity) -> bool {
        self.seen.contains(identity)
    }

    /// Records the identity; false if it was already present.
    pub fn record(&mut self, identity: MatchIdentity) -> bool {
        self.seen.insert(identity)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Date-granularity dedup layer above the per-match ledger: dates already
/// ingested are skipped entirely on later runs. Persisted as a JSON array of
/// `YYYY-MM-DD` strings.
#[derive(Debug, Default)]
pub struct ProcessedDates {
    dates: BTreeSet<NaiveDate>,
}

impl ProcessedDates {
    /// Missing or unreadable ledger files start empty; a corrupt ledger only
    /// costs re-fetching, never the run.
    pub fn load(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };
        let Ok(entries) = serde_json::from_str::<Vec<String>>(&raw) else {
            return Self::default();
        };
        let dates = entries
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
            .collect();
        Self { dates }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok();
        }
        let entries = self
            .dates
            .iter()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect::<Vec<_>>();
        let json = serde_json::to_string_pretty(&entries).context("serialize processed dates")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write processed dates")?;
        fs::rename(&tmp, path).context("swap processed dates")?;
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn mark(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
