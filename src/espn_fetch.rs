use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_client::http_client;
use crate::league::LeagueKey;

const ESPN_FBA_BASE: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/fba/seasons";
const LEAGUE_VIEWS: [&str; 6] = [
    "modular",
    "mNav",
    "mMatchupScore",
    "mScoreboard",
    "mSettings",
    "mTeam",
];
const ERROR_BODY_LIMIT: usize = 200;

pub fn build_api_url(key: &LeagueKey) -> String {
    let views = LEAGUE_VIEWS
        .iter()
        .map(|v| format!("view={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{ESPN_FBA_BASE}/{}/segments/0/leagues/{}?{views}",
        key.season, key.league_id
    )
}

/// One GET against the league endpoint. No retry; any failure aborts the run.
pub fn fetch_league_json(key: &LeagueKey, timeout_secs: u64) -> Result<Value> {
    let client = http_client(timeout_secs)?;
    let url = build_api_url(key);
    tracing::info!(%url, "requesting league data");

    let resp = client.get(&url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        tracing::debug!(%status, "league request rejected");
        return Err(anyhow::anyhow!(
            "http {}: {}",
            status,
            truncate(&body, ERROR_BODY_LIMIT)
        ));
    }
    tracing::info!(bytes = body.len(), "received league data");
    parse_league_json(&body)
}

pub fn parse_league_json(body: &str) -> Result<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty league response"));
    }
    serde_json::from_str(trimmed).context("invalid league json")
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
