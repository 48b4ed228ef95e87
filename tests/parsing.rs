use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use formbook::fetch::parse_scheduled_events_json;
use formbook::record::{self, ParseOutcome};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_scheduled_events_fixture() {
    let raw = read_fixture("scheduled_events.json");
    let events = parse_scheduled_events_json(&raw).expect("fixture should parse");
    assert_eq!(events.len(), 4);

    assert_eq!(events[0].home_team, "Arsenal");
    assert_eq!(events[0].home_score, Some(2));
    assert_eq!(events[0].away_score, Some(1));

    // Empty score objects mean the fixture has not been played.
    assert_eq!(events[1].home_score, None);
    assert_eq!(events[1].away_score, None);

    // Missing team name survives parsing and is classified later.
    assert!(events[2].home_team.is_empty());

    // String-typed score digits are accepted.
    assert_eq!(events[3].home_score, Some(3));
    assert_eq!(events[3].away_score, Some(0));
}

#[test]
fn classification_of_fixture_events() {
    let raw = read_fixture("scheduled_events.json");
    let events = parse_scheduled_events_json(&raw).expect("fixture should parse");
    let date = NaiveDate::from_ymd_opt(2025, 3, 7);

    let outcomes = events
        .into_iter()
        .map(|event| record::classify(event, date))
        .collect::<Vec<_>>();

    assert!(matches!(outcomes[0], ParseOutcome::Played(_)));
    assert!(matches!(outcomes[1], ParseOutcome::Unplayed { .. }));
    assert!(matches!(outcomes[2], ParseOutcome::Malformed(_)));
    assert!(matches!(outcomes[3], ParseOutcome::Played(_)));

    let ParseOutcome::Played(record) = &outcomes[0] else {
        panic!("expected played record");
    };
    assert_eq!(record.date, date);
    assert_eq!(record.identity().home_team, "Arsenal");
}

#[test]
fn null_and_empty_bodies_are_zero_events() {
    assert!(parse_scheduled_events_json("null").expect("null ok").is_empty());
    assert!(parse_scheduled_events_json("  ").expect("blank ok").is_empty());
    assert!(
        parse_scheduled_events_json("{\"events\": []}")
            .expect("empty ok")
            .is_empty()
    );
    assert!(parse_scheduled_events_json("{}").expect("no key ok").is_empty());
}

#[test]
fn invalid_body_is_an_error() {
    assert!(parse_scheduled_events_json("{not json").is_err());
}
