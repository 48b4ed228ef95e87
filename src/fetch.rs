use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::record::RawEvent;

const DEFAULT_API_BASE: &str = "https://api.sofascore.com/api/v1/sport/football/scheduled-events";
const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Fetches the scheduled-events listing for one calendar date. Transport
/// failures and non-2xx responses surface as errors; the caller decides
/// whether the date is retried.
pub fn fetch_scheduled_events(date: NaiveDate) -> Result<Vec<RawEvent>> {
    let client = http_client()?;
    let url = format!("{}/{}", api_base(), date.format("%Y-%m-%d"));
    let resp = client
        .get(&url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_scheduled_events_json(&body)
}

fn api_base() -> String {
    env::var("FORMBOOK_API_BASE")
        .ok()
        .filter(|base| !base.trim().is_empty())
        .map(|base| base.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Pure parser over the scheduled-events payload. Individual events with
/// missing fields come through as partially-filled [`RawEvent`]s so the
/// classification layer can log them; a `null` or empty body is zero events.
pub fn parse_scheduled_events_json(raw: &str) -> Result<Vec<RawEvent>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid scheduled-events json")?;
    let Some(events) = root.get("events").and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };
    Ok(events.iter().map(parse_event).collect())
}

fn parse_event(v: &Value) -> RawEvent {
    RawEvent {
        home_team: team_name(v.get("homeTeam")),
        away_team: team_name(v.get("awayTeam")),
        home_score: score_current(v.get("homeScore")),
        away_score: score_current(v.get("awayScore")),
    }
}

fn team_name(v: Option<&Value>) -> String {
    v.and_then(|team| team.get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or_default()
        .to_string()
}

fn score_current(v: Option<&Value>) -> Option<u32> {
    let current = v?.get("current")?;
    let n = as_u64_any(current)?;
    u32::try_from(n).ok()
}

fn as_u64_any(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return Some(n);
    }
    v.as_str()?.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_current_accepts_string_digits() {
        let score: Value = serde_json::json!({"current": "3"});
        assert_eq!(score_current(Some(&score)), Some(3));
        let null_score: Value = serde_json::json!({"current": null});
        assert_eq!(score_current(Some(&null_score)), None);
    }
}
