use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".fitness-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "tracker.db";
const LOG_FILE_NAME: &str = "tracker.log";

/// Where the tracker keeps its files. Exports are written next to the
/// database so a user finds everything in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Resolve the layout under `~/.fitness-tracker/`.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Same layout rooted at an arbitrary directory.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            export_dir: data_dir.clone(),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }
}
