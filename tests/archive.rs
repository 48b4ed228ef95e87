use chrono::NaiveDate;
use tempfile::tempdir;

use formbook::archive;
use formbook::record::{MatchRecord, ParseOutcome};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).expect("valid test date")
}

fn m(home: &str, hs: u32, away: &str, asc: u32, d: u32) -> MatchRecord {
    MatchRecord {
        date: Some(date(d)),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: hs,
        away_score: asc,
    }
}

#[test]
fn day_file_round_trips() {
    let dir = tempdir().expect("tempdir");
    let matches = vec![m("Arsenal", 2, "Chelsea", 1, 7), m("Leeds", 0, "Fulham", 0, 7)];
    archive::write_day(dir.path(), date(7), &matches).expect("write");

    let outcomes = archive::read_day(dir.path(), date(7)).expect("read");
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0], ParseOutcome::Played(matches[0].clone()));
    assert_eq!(outcomes[1], ParseOutcome::Played(matches[1].clone()));
}

#[test]
fn missing_day_file_is_zero_matches() {
    let dir = tempdir().expect("tempdir");
    let outcomes = archive::read_day(dir.path(), date(1)).expect("read");
    assert!(outcomes.is_empty());
}

#[test]
fn malformed_blocks_do_not_abort_the_read() {
    let raw = "Arsenal, 2\nChelsea, 1\n\nonly one line\n\nLeeds, x\nFulham, 0\n\nSpurs, 3\nEverton, 0";
    let outcomes = archive::parse_day(raw, date(5));
    assert_eq!(outcomes.len(), 4);
    assert!(matches!(outcomes[0], ParseOutcome::Played(_)));
    assert!(matches!(outcomes[1], ParseOutcome::Malformed(_)));
    assert!(matches!(outcomes[2], ParseOutcome::Malformed(_)));
    assert!(matches!(outcomes[3], ParseOutcome::Played(_)));
}

#[test]
fn available_dates_sorted_and_filtered() {
    let dir = tempdir().expect("tempdir");
    archive::write_day(dir.path(), date(9), &[]).expect("write");
    archive::write_day(dir.path(), date(2), &[]).expect("write");
    std::fs::write(dir.path().join("notes.txt"), "junk").expect("write junk");
    std::fs::write(dir.path().join("scores_not-a-date.txt"), "junk").expect("write junk");

    let dates = archive::available_dates(dir.path()).expect("scan");
    assert_eq!(dates, vec![date(2), date(9)]);
}

#[test]
fn missing_archive_dir_is_empty() {
    let dir = tempdir().expect("tempdir");
    let nested = dir.path().join("nope");
    assert!(archive::available_dates(&nested).expect("scan").is_empty());
}
