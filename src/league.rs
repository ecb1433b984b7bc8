use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

use crate::error::InputError;

pub const DEFAULT_LEAGUE_ID: &str = "2803";
pub const DEFAULT_SEASON: &str = "2025";
pub const UNKNOWN_LEAGUE_NAME: &str = "Unknown League";

/// ESPN basketball stat codes. Several codes share an abbreviation (season totals vs per-game).
pub const STAT_NAMES: [(u32, &str); 44] = [
    (0, "PTS"),
    (1, "BLK"),
    (2, "STL"),
    (3, "AST"),
    (4, "OREB"),
    (5, "DREB"),
    (6, "REB"),
    (7, "EJ"),
    (8, "FF"),
    (9, "PF"),
    (10, "TF"),
    (11, "TO"),
    (12, "DQ"),
    (13, "FGM"),
    (14, "FGA"),
    (15, "FTM"),
    (16, "FTA"),
    (17, "3PM"),
    (18, "3PA"),
    (19, "FG%"),
    (20, "FT%"),
    (21, "3P%"),
    (22, "AFG%"),
    (23, "FGMI"),
    (24, "FTMI"),
    (25, "3PMI"),
    (26, "AST"),
    (27, "BLK"),
    (28, "MIN"),
    (29, "PTS"),
    (30, "REB"),
    (31, "STL"),
    (32, "TO"),
    (33, "3PM"),
    (34, "PPM"),
    (35, "A/TO"),
    (36, "STR"),
    (37, "DD"),
    (38, "TD"),
    (39, "QD"),
    (40, "MIN"),
    (41, "GS"),
    (42, "GP"),
    (43, "TW"),
];

/// Identifies one league instance. Both parts keep the digits exactly as typed (after trimming),
/// so `"02803"` and ids wider than any integer type survive into URLs and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueKey {
    pub league_id: String,
    pub season: String,
}

impl LeagueKey {
    pub fn parse(league_id: &str, season: &str) -> Result<Self, InputError> {
        Ok(Self {
            league_id: parse_league_id(league_id)?,
            season: parse_season(season)?,
        })
    }
}

impl fmt::Display for LeagueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.league_id, self.season)
    }
}

pub fn parse_league_id(raw: &str) -> Result<String, InputError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NonNumericLeagueId);
    }
    Ok(raw.to_string())
}

pub fn parse_season(raw: &str) -> Result<String, InputError> {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidSeason);
    }
    Ok(raw.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueInfo {
    pub name: String,
    pub teams: BTreeMap<u32, String>,
    /// Only the categories the league actually scores.
    pub stats: BTreeMap<u32, String>,
}

impl LeagueInfo {
    pub fn stat_name(&self, stat_id: u32) -> Option<&str> {
        self.stats.get(&stat_id).map(String::as_str)
    }

    pub fn team_name(&self, team_id: u32) -> Option<&str> {
        self.teams.get(&team_id).map(String::as_str)
    }
}

pub fn known_stat_name(stat_id: u32) -> Option<&'static str> {
    STAT_NAMES
        .iter()
        .find(|(id, _)| *id == stat_id)
        .map(|(_, name)| *name)
}

pub fn normalize_league(raw: &Value) -> LeagueInfo {
    let settings = raw.get("settings");
    let name = settings
        .and_then(|s| s.get("name"))
        .and_then(|v| v.as_str())
        .unwrap_or(UNKNOWN_LEAGUE_NAME)
        .to_string();

    let mut teams = BTreeMap::new();
    if let Some(arr) = raw.get("teams").and_then(|v| v.as_array()) {
        for team in arr {
            let Some(id) = team.get("id").and_then(as_u32) else {
                tracing::debug!("skipping team entry without a numeric id");
                continue;
            };
            let display = team
                .get("abbrev")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("Team {id}"));
            teams.insert(id, display);
        }
    }

    let scored: BTreeSet<u32> = settings
        .and_then(|s| s.get("scoringSettings"))
        .and_then(|s| s.get("scoringItems"))
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("statId").and_then(as_u32))
                .collect()
        })
        .unwrap_or_default();

    let mut stats = BTreeMap::new();
    for stat_id in scored {
        match known_stat_name(stat_id) {
            Some(name) => {
                stats.insert(stat_id, name.to_string());
            }
            None => tracing::debug!(stat_id, "dropping unknown scored stat code"),
        }
    }

    tracing::info!(
        league = %name,
        teams = teams.len(),
        categories = stats.len(),
        "normalized league data"
    );

    LeagueInfo { name, teams, stats }
}

/// One-line summaries of the team and stat mappings, sorted by id.
pub fn describe_mappings(league: &LeagueInfo) -> (String, String) {
    let teams = league
        .teams
        .iter()
        .map(|(id, name)| format!("{id}:{name}"))
        .collect::<Vec<_>>()
        .join(", ");
    let stats = league
        .stats
        .iter()
        .map(|(id, name)| format!("{id}:{name}"))
        .collect::<Vec<_>>()
        .join(", ");
    (teams, stats)
}

pub(crate) fn as_u32(v: &Value) -> Option<u32> {
    v.as_u64().and_then(|n| u32::try_from(n).ok())
}
