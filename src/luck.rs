use std::collections::{BTreeMap, BTreeSet};

use crate::expected::{ScoredTeamWeek, ScoredWeeks};

#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub week: u32,
    pub team: String,
    pub luck: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamLuck {
    pub team: String,
    pub season: f64,
    pub weekly: BTreeMap<u32, f64>,
}

impl TeamLuck {
    pub fn week(&self, week: u32) -> Option<f64> {
        self.weekly.get(&week).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuckSummary {
    /// Weeks where at least one team has a defined luck value, ascending.
    pub weeks: Vec<u32>,
    /// Ranked by season luck, luckiest first.
    pub teams: Vec<TeamLuck>,
    pub luckiest: Option<Extreme>,
    pub unluckiest: Option<Extreme>,
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut total = 0.0;
    let mut n = 0usize;
    for v in values {
        total += v;
        n += 1;
    }
    (n > 0).then(|| total / n as f64)
}

/// Actual minus expected result rate, both taken over the categories that have an
/// expected value. Undefined when no category has both.
pub fn week_luck(tw: &ScoredTeamWeek) -> Option<f64> {
    let expected = tw.expected.as_ref()?;
    let mut actual = Vec::with_capacity(expected.len());
    let mut wanted = Vec::with_capacity(expected.len());
    for (cat, exp) in expected {
        if let Some(outcome) = tw.week.results.get(cat) {
            actual.push(outcome.value());
            wanted.push(*exp);
        }
    }
    Some(mean(actual)? - mean(wanted)?)
}

/// Walks weeks ascending, then teams by name. The first strictly larger/smaller value wins.
pub fn find_extremes(scored: &ScoredWeeks) -> (Option<Extreme>, Option<Extreme>) {
    let mut luckiest: Option<Extreme> = None;
    let mut unluckiest: Option<Extreme> = None;

    for (week, teams) in scored {
        for (team, tw) in teams {
            let Some(luck) = week_luck(tw) else {
                continue;
            };
            if luckiest.as_ref().is_none_or(|e| luck > e.luck) {
                luckiest = Some(Extreme {
                    week: *week,
                    team: team.clone(),
                    luck,
                });
            }
            if unluckiest.as_ref().is_none_or(|e| luck < e.luck) {
                unluckiest = Some(Extreme {
                    week: *week,
                    team: team.clone(),
                    luck,
                });
            }
        }
    }

    (luckiest, unluckiest)
}

pub fn summarize(scored: &ScoredWeeks) -> LuckSummary {
    let mut weeks = Vec::new();
    let mut per_team: BTreeMap<String, BTreeMap<u32, f64>> = BTreeMap::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (week, teams) in scored {
        let mut active = false;
        for (team, tw) in teams {
            seen.insert(team.as_str());
            if let Some(luck) = week_luck(tw) {
                per_team.entry(team.clone()).or_default().insert(*week, luck);
                active = true;
            }
        }
        if active {
            weeks.push(*week);
        }
    }

    let mut ranked: Vec<TeamLuck> = per_team
        .into_iter()
        .filter_map(|(team, weekly)| {
            let season = mean(weekly.values().copied())?;
            Some(TeamLuck {
                team,
                season,
                weekly,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.season.total_cmp(&a.season));

    let dropped = seen.len().saturating_sub(ranked.len());
    if dropped > 0 {
        tracing::debug!(dropped, "teams without any defined week left out of ranking");
    }

    let (luckiest, unluckiest) = find_extremes(scored);
    LuckSummary {
        weeks,
        teams: ranked,
        luckiest,
        unluckiest,
    }
}
