use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use archiver_core::Locale;
use archiver_logging::{driver_info, driver_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// User-facing defaults that survive across sessions: the display locale,
/// the post-action delay, and whether terminal toasts are wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverSettings {
    pub locale: Locale,
    pub action_delay_ms: u64,
    pub show_notifications: bool,
}

impl Default for ArchiverSettings {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            action_delay_ms: 1000,
            show_notifications: true,
        }
    }
}

/// Narrow persistence contract the driver depends on. Load failures must
/// degrade to defaults; settings are convenience state, never a reason to
/// refuse a run.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> ArchiverSettings;
    fn save(&self, settings: &ArchiverSettings);
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("settings directory missing or not writable: {0}")]
    SettingsDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Serialized form is kept separate from the domain type so the on-disk
/// schema can evolve independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    language: String,
    action_delay_ms: u64,
    show_notifications: bool,
}

/// RON-file-backed store writing atomically (temp file, then rename).
pub struct RonSettingsStore {
    path: PathBuf,
}

impl RonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write_atomic(&self, content: &str) -> Result<(), PersistError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| PersistError::SettingsDir(e.to_string()))?;
        }

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace any existing file to keep the store deterministic.
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        tmp.persist(&self.path).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}

impl SettingsStore for RonSettingsStore {
    fn load(&self) -> ArchiverSettings {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return ArchiverSettings::default();
            }
            Err(err) => {
                driver_warn!("Failed to read settings from {:?}: {}", self.path, err);
                return ArchiverSettings::default();
            }
        };

        let persisted: PersistedSettings = match ron::from_str(&content) {
            Ok(persisted) => persisted,
            Err(err) => {
                driver_warn!("Failed to parse settings from {:?}: {}", self.path, err);
                return ArchiverSettings::default();
            }
        };

        driver_info!("Loaded settings from {:?}", self.path);
        ArchiverSettings {
            locale: Locale::from_tag(&persisted.language),
            action_delay_ms: persisted.action_delay_ms,
            show_notifications: persisted.show_notifications,
        }
    }

    fn save(&self, settings: &ArchiverSettings) {
        let persisted = PersistedSettings {
            language: settings.locale.as_tag().to_string(),
            action_delay_ms: settings.action_delay_ms,
            show_notifications: settings.show_notifications,
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&persisted, pretty) {
            Ok(text) => text,
            Err(err) => {
                driver_warn!("Failed to serialize settings: {}", err);
                return;
            }
        };

        if let Err(err) = self.write_atomic(&content) {
            driver_warn!("Failed to write settings to {:?}: {}", self.path, err);
        }
    }
}
