use std::fs;
use std::path::PathBuf;

use crate::core::station::{StationState, CURRENT_SCHEMA_VERSION};
use crate::errors::StationError;
use crate::utils::{base_dir, ensure_dir};

use super::StorageBackend;

const SNAPSHOT_FILE: &str = "station.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file persistence for the station snapshot.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    snapshot_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self, StationError> {
        let root = root.unwrap_or_else(base_dir);
        ensure_dir(&root)?;
        Ok(Self {
            snapshot_file: root.join(SNAPSHOT_FILE),
        })
    }

    pub fn new_default() -> Result<Self, StationError> {
        Self::new(None)
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<StationState>, StationError> {
        if !self.snapshot_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.snapshot_file)?;
        let state: StationState = serde_json::from_str(&data)?;
        if state.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StationError::Persistence(format!(
                "station snapshot schema v{} is newer than supported v{}",
                state.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(Some(state))
    }

    /// Writes the snapshot atomically by staging to a temporary file.
    fn save(&self, state: &StationState) -> Result<PathBuf, StationError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.snapshot_file.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.snapshot_file)?;
        Ok(self.snapshot_file.clone())
    }

    fn snapshot_path(&self) -> PathBuf {
        self.snapshot_file.clone()
    }
}
