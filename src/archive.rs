use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::record::{MatchRecord, ParseOutcome};

const FILE_PREFIX: &str = "scores_";
const FILE_SUFFIX: &str = ".txt";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn day_file(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", date.format(DATE_FORMAT)))
}

/// Writes one day's played matches as the flat block format: two
/// `"<team>, <score>"` lines per match, blank line between matches.
pub fn write_day(dir: &Path, date: NaiveDate, matches: &[MatchRecord]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create archive dir {}", dir.display()))?;
    let body = matches
        .iter()
        .map(|m| {
            format!(
                "{}, {}\n{}, {}",
                m.home_team, m.home_score, m.away_team, m.away_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    let path = day_file(dir, date);
    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, body).with_context(|| format!("write day file {}", path.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("swap day file {}", path.display()))?;
    Ok(())
}

/// Reads one day's archive back. A missing file is zero matches; malformed
/// blocks come through as `ParseOutcome::Malformed` so the caller can log
/// them without aborting the read.
pub fn read_day(dir: &Path, date: NaiveDate) -> Result<Vec<ParseOutcome>> {
    let path = day_file(dir, date);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("read day file {}", path.display()));
        }
    };
    Ok(parse_day(&raw, date))
}

pub fn parse_day(raw: &str, date: NaiveDate) -> Vec<ParseOutcome> {
    raw.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| parse_block(block, date))
        .collect()
}

fn parse_block(block: &str, date: NaiveDate) -> ParseOutcome {
    let mut lines = block.trim().lines();
    let (Some(home_line), Some(away_line)) = (lines.next(), lines.next()) else {
        return ParseOutcome::Malformed(format!("incomplete match block {block:?}"));
    };
    let Some((home_team, home_score)) = parse_score_line(home_line) else {
        return ParseOutcome::Malformed(format!("bad score line {home_line:?}"));
    };
    let Some((away_team, away_score)) = parse_score_line(away_line) else {
        return ParseOutcome::Malformed(format!("bad score line {away_line:?}"));
    };
    ParseOutcome::Played(MatchRecord {
        date: Some(date),
        home_team,
        away_team,
        home_score,
        away_score,
    })
}

// rsplit keeps team names containing ", " intact.
fn parse_score_line(line: &str) -> Option<(String, u32)> {
    let (team, score) = line.rsplit_once(", ")?;
    let team = team.trim();
    if team.is_empty() {
        return None;
    }
    let score = score.trim().parse::<u32>().ok()?;
    Some((team.to_string(), score))
}

/// Scans the archive dir for `scores_YYYY-MM-DD.txt` files, sorted
/// ascending. Files that do not match the pattern are ignored.
pub fn available_dates(dir: &Path) -> Result<Vec<NaiveDate>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries =
        fs::read_dir(dir).with_context(|| format!("list archive dir {}", dir.display()))?;
    let mut dates = Vec::new();
    for entry in entries {
        let entry = entry.context("read archive dir entry")?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(stem) = name
            .strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
        else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(stem, DATE_FORMAT) {
            dates.push(date);
        }
    }
    dates.sort_unstable();
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::parse_score_line;

    #[test]
    fn parse_score_line_works() {
        assert_eq!(
            parse_score_line("Arsenal, 2"),
            Some(("Arsenal".to_string(), 2))
        );
        assert_eq!(
            parse_score_line("1. FC Köln, 0"),
            Some(("1. FC Köln".to_string(), 0))
        );
        assert_eq!(parse_score_line("Arsenal"), None);
        assert_eq!(parse_score_line("Arsenal, x"), None);
    }

    #[test]
    fn comma_in_team_name_splits_on_last_separator() {
        assert_eq!(
            parse_score_line("Club, DF, 3"),
            Some(("Club, DF".to_string(), 3))
        );
    }
}
