use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::archive;

pub const DEFAULT_DATA_DIR: &str = "match_stats";

/// Where the data lives: the per-day archive, the team-state snapshot, the
/// processed-date ledger and the skip log all sit in one directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `FORMBOOK_DATA_DIR` overrides the default `match_stats` directory.
    pub fn from_env() -> Self {
        let dir = env::var("FORMBOOK_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    pub fn teams_file(&self) -> PathBuf {
        self.dir.join("teams.json")
    }

    pub fn processed_file(&self) -> PathBuf {
        self.dir.join("processed_dates.json")
    }

    pub fn skip_log(&self) -> PathBuf {
        self.dir.join("skipped_matches.log")
    }

    pub fn day_file(&self, date: NaiveDate) -> PathBuf {
        archive::day_file(&self.dir, date)
    }
}
