use std::fs;
use std::path::PathBuf;

use matchup_luck::expected::compute_expected;
use matchup_luck::luck::week_luck;
use matchup_luck::matchups::Outcome;
use matchup_luck::pipeline::analyze;
use serde_json::Value;

fn read_fixture(name: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn normalizes_league_and_drops_unknown_stats() {
    let analysis = analyze(&read_fixture("league_small.json"));
    assert_eq!(analysis.league.name, "Test Hoops League");
    assert_eq!(analysis.league.teams.len(), 4);
    assert_eq!(
        analysis.league.stats.values().collect::<Vec<_>>(),
        vec!["PTS", "REB"]
    );

    for teams in analysis.extraction.weeks.values() {
        for tw in teams.values() {
            assert!(tw.scores.keys().all(|k| k == "PTS" || k == "REB"));
            assert_eq!(
                tw.scores.keys().collect::<Vec<_>>(),
                tw.results.keys().collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn only_completed_matchups_are_kept() {
    let analysis = analyze(&read_fixture("league_small.json"));
    let weeks = &analysis.extraction.weeks;

    let week2: Vec<&str> = weeks[&2].keys().map(String::as_str).collect();
    assert_eq!(week2, vec!["AAA", "CCC"]);
    let week3: Vec<&str> = weeks[&3].keys().map(String::as_str).collect();
    assert_eq!(week3, vec!["DDD"]);

    let stats = &analysis.extraction.stats;
    assert_eq!(stats.matchups_used, 4);
    assert_eq!(stats.skipped_incomplete, 2);
    assert_eq!(stats.skipped_byes, 1);
    assert_eq!(stats.skipped_unknown_teams, 1);
    assert_eq!(weeks[&1]["CCC"].results["REB"], Outcome::Tie);
}

#[test]
fn expected_results_against_the_full_field() {
    let analysis = analyze(&read_fixture("league_small.json"));
    let week1 = &analysis.scored[&1];

    let aaa = week1["AAA"].expected.as_ref().unwrap();
    assert_eq!(aaa["PTS"], 1.0);
    assert_eq!(aaa["REB"], 0.0);
    assert!(close(week_luck(&week1["AAA"]).unwrap(), 0.0));

    let ccc = week1["CCC"].expected.as_ref().unwrap();
    assert!(close(ccc["PTS"], 1.0 / 3.0));
    assert_eq!(ccc["REB"], 0.5);

    for teams in analysis.scored.values() {
        let n = teams.len();
        for tw in teams.values() {
            match &tw.expected {
                Some(expected) => {
                    assert!(n >= 2);
                    assert!(expected.values().all(|v| (0.0..=1.0).contains(v)));
                    assert_eq!(
                        expected.keys().collect::<Vec<_>>(),
                        tw.week.results.keys().collect::<Vec<_>>()
                    );
                }
                None => assert_eq!(n, 1),
            }
        }
    }

    assert!(analysis.scored[&3]["DDD"].expected.is_none());
}

#[test]
fn season_ranking_and_extremes() {
    let summary = analyze(&read_fixture("league_small.json")).summary;
    assert_eq!(summary.weeks, vec![1, 2]);

    let order: Vec<&str> = summary.teams.iter().map(|t| t.team.as_str()).collect();
    assert_eq!(order, vec!["DDD", "AAA", "BBB", "CCC"]);
    assert!(close(summary.teams[0].season, 1.0 / 6.0));
    assert!(close(summary.teams[3].season, -1.0 / 12.0));
    assert_eq!(summary.teams[0].week(2), None);

    let luckiest = summary.luckiest.unwrap();
    assert_eq!((luckiest.week, luckiest.team.as_str()), (1, "DDD"));
    let unluckiest = summary.unluckiest.unwrap();
    assert_eq!((unluckiest.week, unluckiest.team.as_str()), (1, "CCC"));
    assert!(close(unluckiest.luck, -1.0 / 6.0));
}

#[test]
fn recomputing_does_not_touch_extracted_weeks() {
    let analysis = analyze(&read_fixture("league_small.json"));
    let again = compute_expected(&analysis.extraction.weeks);
    assert_eq!(again, analysis.scored);
}

#[test]
fn empty_payload_yields_empty_report() {
    let analysis = analyze(&serde_json::json!({}));
    assert_eq!(analysis.league.name, "Unknown League");
    assert!(analysis.extraction.weeks.is_empty());
    assert!(analysis.summary.teams.is_empty());
    assert!(analysis.summary.luckiest.is_none());
}
