use std::io::{self, BufRead, Write};

use url::Url;

use crate::console::{Tone, prompt_marker, write_line};
use crate::error::InputError;
use crate::league::{DEFAULT_LEAGUE_ID, DEFAULT_SEASON, LeagueKey, parse_league_id, parse_season};

/// What a pasted league URL told us. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlLeague {
    pub league_id: Option<String>,
    pub season: Option<String>,
}

/// Pulls `leagueId` (and `seasonId` when present) out of a fantasy league URL.
pub fn parse_league_url(raw: &str) -> UrlLeague {
    let Ok(url) = Url::parse(raw.trim()) else {
        return UrlLeague::default();
    };
    let mut out = UrlLeague::default();
    for (name, value) in url.query_pairs() {
        match name.as_ref() {
            "leagueId" => out.league_id = parse_league_id(&value).ok(),
            "seasonId" => out.season = parse_season(&value).ok(),
            _ => {}
        }
    }
    out
}

/// Line-based prompts with defaults; invalid answers are reported and asked again.
pub struct Prompter<R, W> {
    input: R,
    out: W,
    colored: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W, colored: bool) -> Self {
        Self {
            input,
            out,
            colored,
        }
    }

    pub fn note(&mut self, tone: Tone, msg: &str) -> io::Result<()> {
        write_line(&mut self.out, tone, msg, self.colored)
    }

    pub fn league_id(&mut self) -> io::Result<String> {
        self.ask(
            &format!("Enter league ID (default: {DEFAULT_LEAGUE_ID})"),
            DEFAULT_LEAGUE_ID,
            parse_league_id,
        )
    }

    pub fn season(&mut self) -> io::Result<String> {
        self.ask(
            &format!("Enter season year (default: {DEFAULT_SEASON})"),
            DEFAULT_SEASON,
            parse_season,
        )
    }

    fn ask<T>(
        &mut self,
        label: &str,
        default: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> io::Result<T> {
        self.note(Tone::Info, label)?;
        loop {
            let answer = self.read_answer()?;
            let answer = if answer.is_empty() { default } else { &answer };
            match parse(answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.note(Tone::Error, &err.to_string())?,
            }
        }
    }

    fn read_answer(&mut self) -> io::Result<String> {
        write!(self.out, "{}", prompt_marker(self.colored))?;
        self.out.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Flags first, then the URL, then interactive prompts for whatever is still missing.
pub fn resolve_league_key<R: BufRead, W: Write>(
    url: Option<&str>,
    league_id: Option<&str>,
    season: Option<&str>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<LeagueKey> {
    let mut id = league_id.and_then(|raw| parse_league_id(raw).ok());
    let mut year = season.and_then(|raw| parse_season(raw).ok());

    if let Some(url) = url {
        prompter.note(Tone::Info, &format!("Parsing URL: {url}"))?;
        let parsed = parse_league_url(url);
        match parsed.league_id {
            Some(found) => {
                prompter.note(Tone::Success, &format!("Found league ID: {found}"))?;
                id = id.or(Some(found));
            }
            None => prompter.note(Tone::Failure, "Could not extract league ID from URL")?,
        }
        year = year.or(parsed.season);
    }

    let league_id = match id {
        Some(id) => id,
        None => prompter.league_id()?,
    };
    let season = match year {
        Some(year) => year,
        None => prompter.season()?,
    };
    Ok(LeagueKey { league_id, season })
}
