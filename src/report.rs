use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::style::Stylize;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::league::LeagueKey;
use crate::luck::{Extreme, LuckSummary};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const PLACEHOLDER: &str = "-";

const HEADLINE: &str = "Team Luck (Actual - Expected) by Week:";
const LUCKY_NOTE: &str = "Positive values = Lucky (performed better than expected)";
const UNLUCKY_NOTE: &str = "Negative values = Unlucky (performed worse than expected)";

const HTML_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
table { border-collapse: collapse; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: right; }
th { background-color: #f5f5f5; }
tr:nth-child(even) { background-color: #f9f9f9; }
.lucky { color: green; font-weight: bold; }
.unlucky { color: red; font-weight: bold; }
.summary { margin: 20px 0; }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    Lucky,
    Unlucky,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub highlight: Highlight,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub league_name: String,
    pub key: LeagueKey,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub html: PathBuf,
}

pub fn format_luck(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn header(summary: &LuckSummary) -> Vec<String> {
    let mut out = vec!["Team".to_string(), "Season".to_string()];
    out.extend(summary.weeks.iter().map(|w| format!("Week {w}")));
    out
}

fn is_cell(extreme: Option<&Extreme>, week: u32, team: &str) -> bool {
    extreme.is_some_and(|e| e.week == week && e.team == team)
}

/// One row per ranked team: name, season average, then each active week.
pub fn rows(summary: &LuckSummary) -> Vec<Vec<Cell>> {
    summary
        .teams
        .iter()
        .map(|team| {
            let mut row = vec![
                Cell {
                    text: team.team.clone(),
                    highlight: Highlight::Plain,
                },
                Cell {
                    text: format_luck(Some(team.season)),
                    highlight: Highlight::Plain,
                },
            ];
            for &week in &summary.weeks {
                let value = team.week(week);
                let highlight = match value {
                    Some(_) if is_cell(summary.luckiest.as_ref(), week, &team.team) => {
                        Highlight::Lucky
                    }
                    Some(_) if is_cell(summary.unluckiest.as_ref(), week, &team.team) => {
                        Highlight::Unlucky
                    }
                    _ => Highlight::Plain,
                };
                row.push(Cell {
                    text: format_luck(value),
                    highlight,
                });
            }
            row
        })
        .collect()
}

pub fn render_table(summary: &LuckSummary, colored: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(header(summary));
    for row in rows(summary) {
        builder.push_record(row.into_iter().map(|cell| match (colored, cell.highlight) {
            (true, Highlight::Lucky) => cell.text.green().to_string(),
            (true, Highlight::Unlucky) => cell.text.red().to_string(),
            _ => cell.text,
        }));
    }
    let mut table = builder.build();
    table
        .with(Style::markdown())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

fn extreme_lines(summary: &LuckSummary) -> Vec<(&'static str, &Extreme)> {
    let mut out = Vec::new();
    if let Some(e) = summary.luckiest.as_ref() {
        out.push(("Most Lucky Result:", e));
    }
    if let Some(e) = summary.unluckiest.as_ref() {
        out.push(("Most Unlucky Result:", e));
    }
    out
}

pub fn render_text(summary: &LuckSummary, colored: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADLINE}");
    let _ = writeln!(out, "{LUCKY_NOTE}");
    let _ = writeln!(out, "{UNLUCKY_NOTE}");
    let _ = writeln!(out);
    out.push_str(&render_table(summary, colored));
    out.push('\n');
    for (label, e) in extreme_lines(summary) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{label}");
        let _ = writeln!(out, "Week {}: {}", e.week, e.team);
        let _ = writeln!(out, "Luck Score: {:.3}", e.luck);
    }
    out
}

pub fn render_html(summary: &LuckSummary, league_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(league_name));
    let _ = writeln!(out, "<style>\n{HTML_STYLE}\n</style>\n</head>\n<body>");
    let _ = writeln!(out, "<h1>Team Luck Analysis</h1>");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(league_name));
    let _ = writeln!(out, "<p>{LUCKY_NOTE}<br>\n{UNLUCKY_NOTE}</p>");

    out.push_str("<table>\n<tr>");
    for h in header(summary) {
        let _ = write!(out, "<th>{}</th>", escape_html(&h));
    }
    out.push_str("</tr>\n");
    for row in rows(summary) {
        out.push_str("<tr>");
        for cell in row {
            let class = match cell.highlight {
                Highlight::Plain => "",
                Highlight::Lucky => " class='lucky'",
                Highlight::Unlucky => " class='unlucky'",
            };
            let _ = write!(out, "<td{class}>{}</td>", escape_html(&cell.text));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    let extremes = extreme_lines(summary);
    if !extremes.is_empty() {
        out.push_str("<div class='summary'>\n");
        for (label, e) in extremes {
            let _ = writeln!(
                out,
                "<p><strong>{label}</strong><br>Week {}: {}<br>Luck Score: {:.3}</p>",
                e.week,
                escape_html(&e.team),
                e.luck
            );
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

pub fn report_file_stem(date: NaiveDate, key: &LeagueKey) -> String {
    format!("{}_{key}_luck", date.format("%Y-%m-%d"))
}

pub fn write_reports(summary: &LuckSummary, ctx: &ReportContext, dir: &Path) -> Result<ReportPaths> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    let stem = report_file_stem(ctx.date, &ctx.key);
    let text = dir.join(format!("{stem}.txt"));
    let html = dir.join(format!("{stem}.html"));

    fs::write(&text, render_text(summary, false))
        .with_context(|| format!("write {}", text.display()))?;
    fs::write(&html, render_html(summary, &ctx.league_name))
        .with_context(|| format!("write {}", html.display()))?;
    tracing::info!(text = %text.display(), html = %html.display(), "wrote luck reports");
    Ok(ReportPaths { text, html })
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luck::TeamLuck;
    use std::collections::BTreeMap;

    fn summary() -> LuckSummary {
        LuckSummary {
            weeks: vec![1, 2],
            teams: vec![
                TeamLuck {
                    team: "A&B".to_string(),
                    season: 0.25,
                    weekly: BTreeMap::from([(1, 0.5), (2, 0.0)]),
                },
                TeamLuck {
                    team: "CCC".to_string(),
                    season: -0.125,
                    weekly: BTreeMap::from([(2, -0.125)]),
                },
            ],
            luckiest: Some(Extreme {
                week: 1,
                team: "A&B".to_string(),
                luck: 0.5,
            }),
            unluckiest: Some(Extreme {
                week: 2,
                team: "CCC".to_string(),
                luck: -0.125,
            }),
        }
    }

    #[test]
    fn placeholder_for_missing_weeks() {
        let rows = rows(&summary());
        let texts: Vec<&str> = rows[1].iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["CCC", "-0.125", "-", "-0.125"]);
        assert_eq!(rows[0][2].highlight, Highlight::Lucky);
        assert_eq!(rows[1][3].highlight, Highlight::Unlucky);
        assert_eq!(rows[0][3].highlight, Highlight::Plain);
    }

    #[test]
    fn text_report_has_table_and_summary() {
        let text = render_text(&summary(), false);
        assert!(text.starts_with(HEADLINE));
        assert!(text.contains("Week 1"));
        assert!(text.contains("0.500"));
        assert!(text.contains("Most Lucky Result:\nWeek 1: A&B\nLuck Score: 0.500"));
        assert!(text.contains("Most Unlucky Result:\nWeek 2: CCC\nLuck Score: -0.125"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn html_marks_extremes_and_escapes() {
        let html = render_html(&summary(), "<Hoops>");
        assert!(html.contains("<h2>&lt;Hoops&gt;</h2>"));
        assert!(html.contains("<td class='lucky'>0.500</td>"));
        assert!(html.contains("<td class='unlucky'>-0.125</td>"));
        assert!(html.contains("<td>A&amp;B</td>"));
    }

    #[test]
    fn empty_summary_renders_header_only() {
        let empty = LuckSummary::default();
        assert_eq!(header(&empty), vec!["Team", "Season"]);
        let text = render_text(&empty, false);
        assert!(!text.contains("Most Lucky"));
        assert!(!render_html(&empty, "x").contains("class='summary'"));
    }

    #[test]
    fn report_names_follow_date_and_league() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let key = LeagueKey::parse("2803", "2025").unwrap();
        assert_eq!(report_file_stem(date, &key), "2025-02-01_2803_2025_luck");
        let padded = LeagueKey::parse("0042", "2025").unwrap();
        assert_eq!(report_file_stem(date, &padded), "2025-02-01_0042_2025_luck");
    }
}
