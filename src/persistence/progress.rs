//! Highest unlocked level, persisted across runs
//!
//! Every soft operation logs and falls back instead of failing; gameplay never
//! stops because a save could not be read or written.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing the progress file
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("progress file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("progress file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("progress file has invalid unlocked_level {unlocked_level}")]
    Invalid { unlocked_level: u32 },
}

impl ProgressError {
    /// The save simply does not exist yet
    pub fn is_missing(&self) -> bool {
        matches!(self, ProgressError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Persisted progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProgress {
    /// Highest level the player may start; never decreases
    pub unlocked_level: u32,
}

impl Default for PersistedProgress {
    fn default() -> Self {
        Self { unlocked_level: 1 }
    }
}

impl PersistedProgress {
    fn validate(self) -> Result<Self, ProgressError> {
        if self.unlocked_level == 0 {
            return Err(ProgressError::Invalid {
                unlocked_level: self.unlocked_level,
            });
        }
        Ok(self)
    }
}

/// Progress with an optional backing file
#[derive(Debug, Clone)]
pub struct ProgressStore {
    /// None keeps progress in memory only
    path: Option<PathBuf>,
    data: PersistedProgress,
}

impl ProgressStore {
    /// Open a file-backed store, loading whatever is there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load_or_default(&path);
        Self {
            path: Some(path),
            data,
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: PersistedProgress::default(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> PersistedProgress {
        self.data
    }

    pub fn unlocked_level(&self) -> u32 {
        self.data.unlocked_level
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.data.unlocked_level
    }

    /// Re-read the backing file and merge it in. The unlocked level keeps the
    /// higher of memory and disk, so a missing or corrupt file never lowers it.
    pub fn load(&mut self) -> PersistedProgress {
        if let Some(path) = &self.path {
            let loaded = load_or_default(path);
            self.data.unlocked_level = self.data.unlocked_level.max(loaded.unlocked_level);
        }
        self.data
    }

    /// Read a progress file, reporting every failure
    pub fn try_load(path: &Path) -> Result<PersistedProgress, ProgressError> {
        let json = std::fs::read_to_string(path)?;
        let data: PersistedProgress = serde_json::from_str(&json)?;
        data.validate()
    }

    /// Write the current progress, creating the parent directory if needed
    pub fn try_save(&self) -> Result<(), ProgressError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.data)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Best-effort save. Returns whether it succeeded; failures are logged.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => {
                log::debug!("Progress saved (unlocked_level={})", self.data.unlocked_level);
                true
            }
            Err(e) => {
                log::warn!("Failed to save progress: {}", e);
                false
            }
        }
    }

    /// Raise the unlocked level and save. Lower or equal levels are ignored.
    ///
    /// Returns true when the unlocked level changed.
    pub fn unlock(&mut self, level: u32) -> bool {
        if level <= self.data.unlocked_level {
            return false;
        }
        self.data.unlocked_level = level;
        log::info!("Unlocked level {}", level);
        self.save();
        true
    }
}

fn load_or_default(path: &Path) -> PersistedProgress {
    match ProgressStore::try_load(path) {
        Ok(data) => {
            log::info!("Loaded progress: unlocked_level={}", data.unlocked_level);
            data
        }
        Err(e) if e.is_missing() => {
            log::info!("No saved progress found, starting fresh");
            PersistedProgress::default()
        }
        Err(e) => {
            log::warn!("Discarding saved progress at {}: {}", path.display(), e);
            PersistedProgress::default()
        }
    }
}
