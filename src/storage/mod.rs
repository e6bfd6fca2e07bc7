pub mod json_backend;

pub use json_backend::JsonStorage;

use std::path::PathBuf;

use crate::core::station::StationState;
use crate::errors::StationError;

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    /// Loads the stored snapshot, or `None` when the station has never been
    /// saved.
    fn load(&self) -> Result<Option<StationState>, StationError>;
    fn save(&self, state: &StationState) -> Result<PathBuf, StationError>;
    fn snapshot_path(&self) -> PathBuf;
}
