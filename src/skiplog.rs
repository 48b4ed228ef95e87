use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

pub const REASON_UNPLAYED: &str = "unplayed/postponed";

/// Append-only diagnostic log for skipped matches, one timestamped line per
/// skip event. Write failures are swallowed: diagnostics must never fail the
/// batch, and the core never reads this file back.
#[derive(Debug, Clone)]
pub struct SkipLog {
    path: PathBuf,
}

impl SkipLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, date: NaiveDate, home_team: &str, away_team: &str, reason: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!(
            "[{timestamp}] Date: {date} - {home_team} vs {away_team} - Reason: {reason}\n"
        );
        if let Some(dir) = self.path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        let _ = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
    }
}
