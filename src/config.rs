use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub const DATA_DIR_ENV: &str = "JOURNOW_DATA_DIR";
pub const DEBUG_ENV: &str = "JOURNOW_DEBUG";

const DATABASE_FILE: &str = "journow.sqlite3";
const TRACKER_DATA_FILE: &str = "tracker.json";

/// Where journow keeps its durable state and how noisy it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub debug: bool,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            debug: false,
        }
    }

    /// Resolve from `JOURNOW_DATA_DIR` / `JOURNOW_DEBUG`, falling back to the
    /// platform data directory.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("com", "polydome", "journow")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| anyhow!("unable to determine a data directory; set {DATA_DIR_ENV}"))?,
        };

        let debug = lookup(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self { data_dir, debug })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn tracker_data_path(&self) -> PathBuf {
        self.data_dir.join(TRACKER_DATA_FILE)
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create data directory {}", self.data_dir.display())
        })
    }
}
