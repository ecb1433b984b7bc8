use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::league::LeagueKey;

pub const DEFAULT_DATA_DIR: &str = "data";
const SNAPSHOT_SUFFIX: &str = "scoreboard.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub raw: Value,
}

/// Dated copies of the raw league payload. Never overwrites an older snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Latest snapshot for the league, or `None` on a miss. Read and parse failures count as misses.
    pub fn load_latest(&self, key: &LeagueKey) -> Option<Snapshot> {
        let path = self.latest_path(key)?;
        match read_snapshot(&path) {
            Ok(raw) => {
                tracing::info!(path = %path.display(), "loaded cached snapshot");
                Some(Snapshot { path, raw })
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "ignoring unreadable snapshot"
                );
                None
            }
        }
    }

    /// File names sort by ISO date, so the greatest matching name is the newest.
    pub fn latest_path(&self, key: &LeagueKey) -> Option<PathBuf> {
        let suffix = format!("_{key}_{SNAPSHOT_SUFFIX}");
        let entries = fs::read_dir(&self.dir).ok()?;
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(&suffix))
            .max()
            .map(|name| self.dir.join(name))
    }

    pub fn save(&self, raw: &Value, key: &LeagueKey) -> Result<PathBuf> {
        self.save_dated(raw, key, Local::now().date_naive())
    }

    pub fn save_dated(&self, raw: &Value, key: &LeagueKey, date: NaiveDate) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create snapshot dir {}", self.dir.display()))?;
        let path = self.dir.join(snapshot_file_name(date, key));
        let tmp = path.with_extension("json.tmp");
        let json = to_pretty_json(raw).context("serialize snapshot")?;
        fs::write(&tmp, json).context("write snapshot")?;
        fs::rename(&tmp, &path).context("swap snapshot")?;
        tracing::info!(path = %path.display(), "saved snapshot");
        Ok(path)
    }
}

pub fn snapshot_file_name(date: NaiveDate, key: &LeagueKey) -> String {
    format!("{}_{key}_{SNAPSHOT_SUFFIX}", date.format("%Y-%m-%d"))
}

fn read_snapshot(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).context("read snapshot")?;
    serde_json::from_str(&raw).context("invalid snapshot json")
}

/// Four-space indentation. Object keys come out sorted since `serde_json::Map` is ordered.
fn to_pretty_json(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
