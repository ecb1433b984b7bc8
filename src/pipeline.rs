use serde_json::Value;

use crate::expected::{ScoredWeeks, compute_expected};
use crate::league::{LeagueInfo, normalize_league};
use crate::luck::{LuckSummary, summarize};
use crate::matchups::{Extraction, extract_matchups};

/// Everything derived from one raw league payload.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub league: LeagueInfo,
    pub extraction: Extraction,
    pub scored: ScoredWeeks,
    pub summary: LuckSummary,
}

pub fn analyze(raw: &Value) -> Analysis {
    let league = normalize_league(raw);
    let extraction = extract_matchups(raw, &league);
    let scored = compute_expected(&extraction.weeks);
    let summary = summarize(&scored);
    Analysis {
        league,
        extraction,
        scored,
        summary,
    }
}
