use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};

use crate::models::TrackerData;

use super::ports::TrackerDataStorage;

/// In-process slot. Does not survive a restart; meant for tests and embedders
/// that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTrackerDataStorage {
    slot: Mutex<Option<TrackerData>>,
}

impl MemoryTrackerDataStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: TrackerData) -> Self {
        Self {
            slot: Mutex::new(Some(data)),
        }
    }
}

impl TrackerDataStorage for MemoryTrackerDataStorage {
    fn read(&self) -> Result<Option<TrackerData>> {
        let guard = self
            .slot
            .lock()
            .map_err(|_| anyhow!("tracker data slot poisoned"))?;
        Ok(*guard)
    }

    fn write(&self, data: &TrackerData) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| anyhow!("tracker data slot poisoned"))?;
        *guard = Some(*data);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| anyhow!("tracker data slot poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Keeps the descriptor as a single JSON document on disk.
///
/// Writes go to a sibling temp file that is renamed over the target, so a crash
/// mid-write leaves either the old descriptor or the new one.
#[derive(Debug)]
pub struct JsonFileTrackerDataStorage {
    path: PathBuf,
}

impl JsonFileTrackerDataStorage {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create tracker data directory {}", parent.display())
            })?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TrackerDataStorage for JsonFileTrackerDataStorage {
    fn read(&self) -> Result<Option<TrackerData>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read tracker data from {}", self.path.display())
                })
            }
        };

        let data = serde_json::from_str(&contents).with_context(|| {
            format!("tracker data at {} is corrupt", self.path.display())
        })?;
        Ok(Some(data))
    }

    fn write(&self, data: &TrackerData) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        let temp = self.temp_path();
        fs::write(&temp, serialized)
            .with_context(|| format!("failed to write tracker data to {}", temp.display()))?;
        fs::rename(&temp, &self.path).with_context(|| {
            format!("failed to move tracker data into {}", self.path.display())
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to clear tracker data at {}", self.path.display())
            }),
        }
    }
}
