use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::StationError;
use crate::utils::{base_dir, ensure_dir};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Carriers the dashboard always displays, even at zero.
static DEFAULT_CARRIERS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "J&T",
        "JADLOG",
        "DIALOGO",
        "CORREIOS",
        "CORREIOS PA",
        "LOGAN",
        "FAVELA LOG",
        "SAC SERVICE",
        "DISSUDES",
    ]
    .into_iter()
    .map(String::from)
    .collect()
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Known carrier display set; the dashboard seeds these at zero.
    pub carriers: Vec<String>,
    /// Suggested dashboard polling cadence for front-ends, in seconds.
    pub dashboard_poll_seconds: u64,
    /// Whether the interactive shell asks before destructive actions.
    pub confirm_destructive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            carriers: DEFAULT_CARRIERS.clone(),
            dashboard_poll_seconds: 45,
            confirm_destructive: true,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StationError> {
        Self::from_base(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StationError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, StationError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, StationError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the configuration atomically by staging to a temporary file.
    pub fn save(&self, config: &Config) -> Result<(), StationError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert!(config.carriers.contains(&"JADLOG".to_string()));
        assert!(config.confirm_destructive);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.carriers = vec!["ACME".into()];
        config.dashboard_poll_seconds = 30;
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.carriers, vec!["ACME".to_string()]);
        assert_eq!(loaded.dashboard_poll_seconds, 30);
    }
}
