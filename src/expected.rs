use std::collections::BTreeMap;

use crate::matchups::{TeamWeek, WeekTable};

/// A team's week plus how it would have fared against the whole field.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTeamWeek {
    pub week: TeamWeek,
    /// `None` when nobody else played that week, so there is nothing to compare against.
    pub expected: Option<BTreeMap<String, f64>>,
}

pub type ScoredWeeks = BTreeMap<u32, BTreeMap<String, ScoredTeamWeek>>;

/// Head-to-head result for one category. Ties use exact float equality.
pub fn compare(a: f64, b: f64) -> f64 {
    if a > b {
        1.0
    } else if a < b {
        0.0
    } else {
        0.5
    }
}

/// Mean result of `team` against every other team in `field`, per category.
///
/// Opponents without a score for a category are left out of that category's mean;
/// a category nobody else scored is omitted.
pub fn expected_for_team(
    team: &str,
    field: &BTreeMap<String, TeamWeek>,
) -> Option<BTreeMap<String, f64>> {
    let own = field.get(team)?;
    if field.len() < 2 {
        return None;
    }

    let mut expected = BTreeMap::new();
    for (category, score) in &own.scores {
        let mut total = 0.0;
        let mut n = 0usize;
        for (opponent, theirs) in field {
            if opponent == team {
                continue;
            }
            let Some(other) = theirs.scores.get(category) else {
                continue;
            };
            total += compare(*score, *other);
            n += 1;
        }
        if n > 0 {
            expected.insert(category.clone(), total / n as f64);
        }
    }
    Some(expected)
}

pub fn compute_expected(weeks: &WeekTable) -> ScoredWeeks {
    weeks
        .iter()
        .map(|(week, field)| {
            let scored = field
                .iter()
                .map(|(team, line)| {
                    let expected = expected_for_team(team, field);
                    (
                        team.clone(),
                        ScoredTeamWeek {
                            week: line.clone(),
                            expected,
                        },
                    )
                })
                .collect();
            (*week, scored)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchups::Outcome;

    fn line(pts: f64, reb: f64) -> TeamWeek {
        TeamWeek {
            scores: BTreeMap::from([("PTS".to_string(), pts), ("REB".to_string(), reb)]),
            results: BTreeMap::from([
                ("PTS".to_string(), Outcome::Loss),
                ("REB".to_string(), Outcome::Loss),
            ]),
        }
    }

    #[test]
    fn compare_is_antisymmetric_with_reflexive_tie() {
        for (a, b) in [(1.0, 2.0), (0.0, -3.5), (100.0, 99.999)] {
            assert_eq!(compare(a, a), 0.5);
            assert_eq!(compare(a, b) + compare(b, a), 1.0);
        }
    }

    #[test]
    fn three_team_week() {
        let field = BTreeMap::from([
            ("A".to_string(), line(100.0, 40.0)),
            ("B".to_string(), line(90.0, 50.0)),
            ("C".to_string(), line(95.0, 45.0)),
        ]);
        let a = expected_for_team("A", &field).unwrap();
        assert_eq!(a["PTS"], 1.0);
        assert_eq!(a["REB"], 0.0);
        let c = expected_for_team("C", &field).unwrap();
        assert_eq!(c["PTS"], 0.5);
        assert_eq!(c["REB"], 0.5);
    }

    #[test]
    fn ties_count_half() {
        let field = BTreeMap::from([
            ("A".to_string(), line(10.0, 5.0)),
            ("B".to_string(), line(10.0, 4.0)),
        ]);
        let a = expected_for_team("A", &field).unwrap();
        assert_eq!(a["PTS"], 0.5);
        assert_eq!(a["REB"], 1.0);
    }

    #[test]
    fn lone_team_has_no_expected_results() {
        let weeks = WeekTable::from([(3, BTreeMap::from([("A".to_string(), line(1.0, 1.0))]))]);
        let scored = compute_expected(&weeks);
        assert_eq!(scored[&3]["A"].expected, None);
    }

    #[test]
    fn opponent_missing_a_category_is_skipped() {
        let mut partial = line(50.0, 0.0);
        partial.scores.remove("REB");
        let field = BTreeMap::from([
            ("A".to_string(), line(60.0, 10.0)),
            ("B".to_string(), partial),
            ("C".to_string(), line(70.0, 5.0)),
        ]);
        let a = expected_for_team("A", &field).unwrap();
        assert_eq!(a["PTS"], 0.5);
        assert_eq!(a["REB"], 1.0);
    }

    #[test]
    fn input_is_left_untouched() {
        let weeks = WeekTable::from([(
            1,
            BTreeMap::from([
                ("A".to_string(), line(1.0, 2.0)),
                ("B".to_string(), line(2.0, 1.0)),
            ]),
        )]);
        let before = weeks.clone();
        let scored = compute_expected(&weeks);
        assert_eq!(weeks, before);
        assert_eq!(scored[&1]["A"].week, before[&1]["A"]);
    }
}
