use std::collections::BTreeMap;

use serde_json::Value;

use crate::league::{LeagueInfo, as_u32};

/// Per-category result as reported upstream for a team's actual matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    pub fn value(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Tie => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    pub fn from_upstream(raw: &str) -> Option<Self> {
        match raw {
            "WIN" => Some(Outcome::Win),
            "TIE" => Some(Outcome::Tie),
            "LOSS" => Some(Outcome::Loss),
            _ => None,
        }
    }
}

/// One team's completed week: raw category scores and upstream results, keyed by display name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamWeek {
    pub scores: BTreeMap<String, f64>,
    pub results: BTreeMap<String, Outcome>,
}

pub type WeekTable = BTreeMap<u32, BTreeMap<String, TeamWeek>>;

/// A per-stat entry exactly as found upstream; fields may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatLine {
    pub stat_id: u32,
    pub score: Option<f64>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub matchups_used: usize,
    pub skipped_incomplete: usize,
    pub skipped_byes: usize,
    pub skipped_unknown_teams: usize,
    pub defaulted_scores: usize,
    pub defaulted_results: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub weeks: WeekTable,
    pub stats: ExtractStats,
}

impl Extraction {
    pub fn team_weeks(&self) -> usize {
        self.weeks.values().map(BTreeMap::len).sum()
    }
}

pub fn extract_matchups(raw: &Value, league: &LeagueInfo) -> Extraction {
    let mut out = Extraction::default();
    let Some(schedule) = raw.get("schedule").and_then(|v| v.as_array()) else {
        return out;
    };

    for matchup in schedule {
        let week = matchup
            .get("matchupPeriodId")
            .and_then(as_u32)
            .filter(|w| *w > 0);
        let decided = matchup
            .get("winner")
            .and_then(|v| v.as_str())
            .is_some_and(|w| !w.trim().is_empty());
        let Some(week) = week.filter(|_| decided) else {
            out.stats.skipped_incomplete += 1;
            continue;
        };

        let (Some(home), Some(away)) = (side(matchup, "home"), side(matchup, "away")) else {
            out.stats.skipped_byes += 1;
            continue;
        };
        out.stats.matchups_used += 1;

        for team in [home, away] {
            let Some(team_name) = team
                .get("teamId")
                .and_then(as_u32)
                .and_then(|id| league.team_name(id))
            else {
                out.stats.skipped_unknown_teams += 1;
                continue;
            };
            let lines = raw_stat_lines(team);
            let team_week = resolve_team_week(&lines, league, &mut out.stats);
            out.weeks
                .entry(week)
                .or_default()
                .insert(team_name.to_string(), team_week);
        }
    }

    tracing::info!(
        weeks = out.weeks.len(),
        team_weeks = out.team_weeks(),
        matchups = out.stats.matchups_used,
        "extracted completed matchups"
    );
    tracing::debug!(
        incomplete = out.stats.skipped_incomplete,
        byes = out.stats.skipped_byes,
        unknown_teams = out.stats.skipped_unknown_teams,
        defaulted_scores = out.stats.defaulted_scores,
        defaulted_results = out.stats.defaulted_results,
        "skipped or defaulted schedule data"
    );
    out
}

fn side<'a>(matchup: &'a Value, key: &str) -> Option<&'a Value> {
    matchup
        .get(key)
        .filter(|v| v.as_object().is_some_and(|obj| !obj.is_empty()))
}

/// Reads `cumulativeScore.scoreByStat`, in upstream key order. Non-numeric stat codes are dropped.
pub fn raw_stat_lines(side: &Value) -> Vec<RawStatLine> {
    let Some(by_stat) = side
        .get("cumulativeScore")
        .and_then(|v| v.get("scoreByStat"))
        .and_then(|v| v.as_object())
    else {
        return Vec::new();
    };

    by_stat
        .iter()
        .filter_map(|(key, entry)| {
            let stat_id = key.trim().parse::<u32>().ok()?;
            Some(RawStatLine {
                stat_id,
                score: entry.get("score").and_then(|v| v.as_f64()),
                result: entry
                    .get("result")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            })
        })
        .collect()
}

/// Keeps only scored categories; a missing score counts as 0.0 and anything but WIN/TIE as a loss.
pub fn resolve_team_week(
    lines: &[RawStatLine],
    league: &LeagueInfo,
    stats: &mut ExtractStats,
) -> TeamWeek {
    let mut week = TeamWeek::default();
    for line in lines {
        let Some(name) = league.stat_name(line.stat_id) else {
            continue;
        };
        let score = line.score.unwrap_or_else(|| {
            stats.defaulted_scores += 1;
            0.0
        });
        let outcome = line
            .result
            .as_deref()
            .and_then(Outcome::from_upstream)
            .unwrap_or_else(|| {
                stats.defaulted_results += 1;
                Outcome::Loss
            });
        week.scores.insert(name.to_string(), score);
        week.results.insert(name.to_string(), outcome);
    }
    week
}
