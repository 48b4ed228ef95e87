use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use formbook::config::DataPaths;
use formbook::fetch;
use formbook::report;
use formbook::state::TeamStore;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let paths = DataPaths::from_env();
    let store = TeamStore::load(&paths.teams_file())?;
    if store.is_empty() {
        return Err(anyhow!(
            "no team statistics in {}; run ingest or rebuild first",
            paths.teams_file().display()
        ));
    }

    if let Some(raw) = flag_value("--date") {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?;
        report_date(&store, date)
    } else if let Some(team) = flag_value("--team") {
        report_team(&store, team.trim())
    } else {
        Err(anyhow!("specify either --date=YYYY-MM-DD or --team=NAME"))
    }
}

fn report_date(store: &TeamStore, date: NaiveDate) -> Result<()> {
    let events = fetch::fetch_scheduled_events(date)
        .with_context(|| format!("fetch fixtures for {date}"))?;
    let playing = report::teams_playing(&events);
    if playing.is_empty() {
        println!("No fixtures found for {date}");
        return Ok(());
    }

    let leaders = report::top_for_teams(store, &playing, 3);
    let known = leaders.iter().map(|l| l.leaders.len()).max().unwrap_or(0);
    if known == 0 {
        println!("No ledger data for any of the {} teams playing on {date}", playing.len());
        return Ok(());
    }

    println!("Top performers for {date} fixtures");
    println!("{}", "=".repeat(40));
    for group in leaders {
        println!("\n{}:", group.category.label());
        for (idx, (team, value)) in group.leaders.iter().enumerate() {
            println!("{}. {team}: {value}", idx + 1);
        }
    }
    Ok(())
}

fn report_team(store: &TeamStore, name: &str) -> Result<()> {
    let Some(state) = store.get(name) else {
        return Err(anyhow!("team {name:?} not found in the ledger"));
    };
    println!("Statistics for {name}:");
    println!("- Current win streak: {}", state.winstreak);
    println!("- Current lose streak: {}", state.losestreak);
    println!("- Matches without win: {}", state.games_without_win);
    println!("- Matches without loss: {}", state.games_without_loss);
    if !state.last_matches_with_opponents.is_empty() {
        println!("- Recent matches:");
        for line in &state.last_matches_with_opponents {
            println!("    {line}");
        }
    }
    if let Some(anchor) = &state.last_streak_match {
        println!(
            "- Streak started: {} ({}-{})",
            anchor.summary(),
            anchor.own_score,
            anchor.opponent_score
        );
    }
    Ok(())
}

fn flag_value(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{flag}=")) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
