use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One result unit as fetched from the API or loaded from an archive file,
/// before classification. Scores are absent for unplayed/postponed fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

/// A fully-played match. Both scores are always present; unplayed fixtures
/// never become a `MatchRecord` (see [`ParseOutcome`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: Option<NaiveDate>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Dedup key: the pairing plus the final score. Two genuinely distinct
/// fixtures between the same teams with the same score collapse to one
/// identity; the source API exposes no stable match id on this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchIdentity {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchRecord {
    pub fn identity(&self) -> MatchIdentity {
        MatchIdentity {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }

    pub fn home_outcome(&self) -> Outcome {
        Outcome::of(self.home_score, self.away_score)
    }

    pub fn away_outcome(&self) -> Outcome {
        Outcome::of(self.away_score, self.home_score)
    }
}

/// Result of a match from one side's perspective. Computed once per side and
/// applied through a single symmetric transition, so home and away never
/// carry separate branch logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn of(own: u32, opponent: u32) -> Self {
        if own > opponent {
            Outcome::Win
        } else if own < opponent {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    pub fn letter(self) -> char {
        match self {
            Outcome::Win => 'w',
            Outcome::Loss => 'l',
            Outcome::Draw => 'd',
        }
    }
}

/// Classification of one raw unit. Unplayed and malformed units are skipped
/// with a diagnostic, never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Played(MatchRecord),
    Unplayed { home_team: String, away_team: String },
    Malformed(String),
}

pub fn classify(raw: RawEvent, date: Option<NaiveDate>) -> ParseOutcome {
    if raw.home_team.trim().is_empty() || raw.away_team.trim().is_empty() {
        return ParseOutcome::Malformed(format!(
            "missing team name ({:?} vs {:?})",
            raw.home_team, raw.away_team
        ));
    }
    match (raw.home_score, raw.away_score) {
        (Some(home_score), Some(away_score)) => ParseOutcome::Played(MatchRecord {
            date,
            home_team: raw.home_team,
            away_team: raw.away_team,
            home_score,
            away_score,
        }),
        _ => ParseOutcome::Unplayed {
            home_team: raw.home_team,
            away_team: raw.away_team,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_covers_all_score_pairs() {
        assert_eq!(Outcome::of(2, 1), Outcome::Win);
        assert_eq!(Outcome::of(0, 3), Outcome::Loss);
        assert_eq!(Outcome::of(1, 1), Outcome::Draw);
        assert_eq!(Outcome::of(0, 0), Outcome::Draw);
    }

    #[test]
    fn classify_missing_score_is_unplayed() {
        let raw = RawEvent {
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            home_score: None,
            away_score: Some(1),
        };
        assert!(matches!(
            classify(raw, None),
            ParseOutcome::Unplayed { .. }
        ));
    }

    #[test]
    fn classify_missing_name_is_malformed() {
        let raw = RawEvent {
            home_team: String::new(),
            away_team: "B".to_string(),
            home_score: Some(1),
            away_score: Some(1),
        };
        assert!(matches!(classify(raw, None), ParseOutcome::Malformed(_)));
    }
}
