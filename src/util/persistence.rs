use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use log::{info, warn};
use serde_json::Error as SerdeError;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CargoValueScanner";
const APP_NAME: &str = "HaulingCalculator";

/// Session key of the calculator snapshot; also the file stem on disk.
pub const STORAGE_KEY: &str = "hauling_beginner_v1";

/// Key-value slot that survives restarts. Loading never fails: anything
/// missing or unreadable comes back as `None`.
pub trait SnapshotStore {
    fn load(&self) -> Option<PersistedState>;
    fn save(&self, state: &PersistedState) -> Result<(), PersistSaveError>;
}

pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// JSON file in the platform config directory.
#[derive(Clone, Debug)]
pub struct ConfigDirStore {
    path: Option<PathBuf>,
}

impl Default for ConfigDirStore {
    fn default() -> Self {
        Self {
            path: config_dir().map(|dir| dir.join(format!("{STORAGE_KEY}.json"))),
        }
    }
}

impl ConfigDirStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl SnapshotStore for ConfigDirStore {
    fn load(&self) -> Option<PersistedState> {
        let path = self.path.as_ref()?;
        let data = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(state) => {
                info!("[state] Restored calculator state from {}", path.display());
                Some(state)
            }
            Err(err) => {
                warn!("[state] Ignoring unreadable snapshot {}: {err}", path.display());
                None
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistSaveError> {
        let path = self.path.as_ref().ok_or(PersistSaveError::StorageUnavailable)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Keeps the serialized snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<PersistedState> {
        let raw = self.raw.lock().ok()?.clone()?;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistSaveError> {
        let json = serde_json::to_string(state)?;
        let mut slot = self
            .raw
            .lock()
            .map_err(|_| PersistSaveError::StorageUnavailable)?;
        *slot = Some(json);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppState, CargoRiskProfile};

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigDirStore::at(dir.path().join("nested").join("state.json"));
        assert!(store.load().is_none());

        let mut snapshot = PersistedState::default();
        snapshot.cargo_type = CargoRiskProfile::HighValue.key().to_string();
        snapshot.buy_price = 12.5;
        store.save(&snapshot).unwrap();

        assert_eq!(store.load(), Some(snapshot));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let store = ConfigDirStore::at(&path);
        assert!(store.load().is_none());

        let state = AppState::restore(&store);
        assert_eq!(state.form.loop_minutes, 25.0);
        assert_eq!(state.form.target_profit_hour, 80_000.0);
    }

    #[test]
    fn memory_store_ignores_garbage() {
        assert!(MemoryStore::with_raw("[1, 2").load().is_none());
        assert!(MemoryStore::with_raw("\"text\"").load().is_none());
        assert!(MemoryStore::default().load().is_none());
    }

    #[test]
    fn missing_storage_reports_error() {
        let store = ConfigDirStore { path: None };
        assert!(matches!(
            store.save(&PersistedState::default()),
            Err(PersistSaveError::StorageUnavailable)
        ));
    }
}
