use std::path::PathBuf;

use clap::Parser;

use crate::http_client::{DEFAULT_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::report::DEFAULT_OUTPUT_DIR;
use crate::snapshot::DEFAULT_DATA_DIR;

/// Calculate matchup luck in fantasy basketball.
#[derive(Debug, Clone, Parser)]
#[command(name = "matchup_luck", version, about)]
pub struct Cli {
    /// ESPN Fantasy Basketball league URL
    #[arg(long)]
    pub url: Option<String>,

    /// League id; skips the prompt when valid
    #[arg(long)]
    pub league_id: Option<String>,

    /// 4-digit season year; skips the prompt when valid
    #[arg(long)]
    pub season: Option<String>,

    /// Ignore cached snapshots and fetch fresh data
    #[arg(long)]
    pub refresh: bool,

    #[arg(long, env = "LUCK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[arg(long, env = "LUCK_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(long, env = "LUCK_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.max(MIN_TIMEOUT_SECS)
    }
}

/// `.env.local` wins over `.env`; real environment variables win over both.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}
