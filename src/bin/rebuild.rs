use anyhow::Result;

use formbook::aggregate::HistoryMode;
use formbook::config::DataPaths;
use formbook::rebuild;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let paths = parse_dir_arg()
        .map(DataPaths::new)
        .unwrap_or_else(DataPaths::from_env);
    let mode = HistoryMode::from_env();

    println!("Rebuilding team statistics from {}", paths.dir.display());
    let summary = rebuild::rebuild(&paths, mode)?;

    println!("Archive days: {}", summary.dates);
    println!(
        "Matches: applied {} / skipped {} / duplicates {}",
        summary.matches_applied, summary.matches_skipped, summary.duplicates
    );
    println!("Saved {}", paths.teams_file().display());
    Ok(())
}

fn parse_dir_arg() -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(dir) = arg.strip_prefix("--dir=") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == "--dir"
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
