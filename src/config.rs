use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::surface::{DEFAULT_CANVAS_SIZE, SurfaceConfig};

/// Names a JSON config file to load
pub const CONFIG_ENV: &str = "DOODLE_MUSEUM_CONFIG";
/// Overrides [`Config::data_dir`]
pub const DATA_DIR_ENV: &str = "DOODLE_MUSEUM_DATA_DIR";
/// Overrides [`Config::critique_api_key`]
pub const CRITIQUE_KEY_ENV: &str = "DOODLE_MUSEUM_CRITIQUE_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct Config {
    /// Side length of the square drawing canvas in pixels
    pub canvas_size: u32,
    /// Maximum number of undo snapshots, unbounded when absent
    pub history_limit: Option<NonZeroUsize>,
    /// Where the gallery tables, images and session file live
    pub data_dir: PathBuf,
    pub critique_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            history_limit: None,
            data_dir: PathBuf::from("doodle_museum_data"),
            critique_api_key: None,
        }
    }
}

impl Config {
    /// Load from the file named by `DOODLE_MUSEUM_CONFIG` (if set), then apply
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(CRITIQUE_KEY_ENV) {
            self.critique_api_key = Some(key);
        }
    }

    pub fn surface(&self) -> SurfaceConfig {
        SurfaceConfig {
            history_limit: self.history_limit,
            ..SurfaceConfig::square(self.canvas_size)
        }
    }

    pub fn gallery_path(&self) -> PathBuf {
        self.data_dir.join("gallery.json")
    }

    pub fn blob_root(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}
