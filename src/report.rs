use std::collections::HashSet;

use crate::record::RawEvent;
use crate::state::{TeamState, TeamStore};

/// The four ledger counters a report can rank teams by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Winstreak,
    Losestreak,
    WithoutWin,
    WithoutLoss,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Winstreak,
        Category::Losestreak,
        Category::WithoutWin,
        Category::WithoutLoss,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Winstreak => "Current Win Streak",
            Category::Losestreak => "Current Lose Streak",
            Category::WithoutWin => "Matches Without Win",
            Category::WithoutLoss => "Matches Without Loss",
        }
    }

    pub fn value(self, state: &TeamState) -> u32 {
        match self {
            Category::Winstreak => state.winstreak,
            Category::Losestreak => state.losestreak,
            Category::WithoutWin => state.games_without_win,
            Category::WithoutLoss => state.games_without_loss,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryLeaders {
    pub category: Category,
    pub leaders: Vec<(String, u32)>,
}

/// Top `take` teams per category among `names`, ties broken by name so the
/// output is stable. Teams without ledger entries are skipped.
pub fn top_for_teams(store: &TeamStore, names: &[String], take: usize) -> Vec<CategoryLeaders> {
    Category::ALL
        .iter()
        .map(|&category| {
            let mut rows = names
                .iter()
                .filter_map(|name| {
                    store
                        .get(name)
                        .map(|state| (name.clone(), category.value(state)))
                })
                .collect::<Vec<_>>();
            rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            rows.truncate(take);
            CategoryLeaders { category, leaders: rows }
        })
        .collect()
}

/// Unique team names appearing in a day's events, first-seen order.
pub fn teams_playing(events: &[RawEvent]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for event in events {
        for name in [&event.home_team, &event.away_team] {
            if !name.trim().is_empty() && seen.insert(name.clone()) {
                out.push(name.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teams_playing_dedups_preserving_order() {
        let events = vec![
            RawEvent {
                home_team: "A".to_string(),
                away_team: "B".to_string(),
                ..Default::default()
            },
            RawEvent {
                home_team: "B".to_string(),
                away_team: "C".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(teams_playing(&events), vec!["A", "B", "C"]);
    }
}
