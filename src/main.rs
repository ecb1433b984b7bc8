use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use matchup_luck::config::{Cli, load_env_files};
use matchup_luck::console;
use matchup_luck::espn_fetch::fetch_league_json;
use matchup_luck::input::{Prompter, resolve_league_key};
use matchup_luck::league::{LeagueKey, describe_mappings};
use matchup_luck::pipeline::analyze;
use matchup_luck::report::{ReportContext, render_text, write_reports};
use matchup_luck::snapshot::SnapshotStore;

const DEFAULT_LOG_FILTER: &str = "matchup_luck=warn";

fn main() -> ExitCode {
    load_env_files();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("run failed: {err:#}");
            console::error(&format!("An error occurred: {err:#}"));
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let colored = console::use_color(&io::stdout());
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout(), colored);
    let key = resolve_league_key(
        cli.url.as_deref(),
        cli.league_id.as_deref(),
        cli.season.as_deref(),
        &mut prompter,
    )
    .context("failed reading league input")?;

    let store = SnapshotStore::new(&cli.data_dir);
    let raw = load_or_fetch(&store, &key, cli)?;

    let analysis = analyze(&raw);
    let (teams, stats) = describe_mappings(&analysis.league);
    console::info(&teams);
    console::info(&stats);

    println!();
    print!("{}", render_text(&analysis.summary, colored));

    let ctx = ReportContext {
        league_name: analysis.league.name.clone(),
        key,
        date: Local::now().date_naive(),
    };
    let paths = write_reports(&analysis.summary, &ctx, &cli.output_dir)?;
    println!();
    console::success("Output saved to:");
    console::success(&format!("Text: {}", paths.text.display()));
    console::success(&format!("HTML: {}", paths.html.display()));
    Ok(())
}

fn load_or_fetch(store: &SnapshotStore, key: &LeagueKey, cli: &Cli) -> Result<Value> {
    if !cli.refresh {
        if let Some(snapshot) = store.load_latest(key) {
            console::success(&format!(
                "Loading cached data from {}",
                snapshot.path.display()
            ));
            return Ok(snapshot.raw);
        }
        console::info("No cached data found, fetching from API...");
    } else {
        console::info("Refresh requested, fetching from API...");
    }

    let raw = fetch_league_json(key, cli.timeout_secs())?;
    match store.save(&raw, key) {
        Ok(path) => console::success(&format!("Saved data to {}", path.display())),
        Err(err) => {
            tracing::debug!("snapshot not saved: {err:#}");
            console::error(&format!("Error saving data: {err:#}"));
        }
    }
    Ok(raw)
}
