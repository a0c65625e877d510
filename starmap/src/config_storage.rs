//! Settings storage for the last poster configuration.
//!
//! All settings are stored in ~/.starmap_config/ by default.

use crate::error::Result;
use crate::settings::PosterSettings;
use std::path::{Path, PathBuf};

const LAST_SETTINGS_FILE: &str = "last_map_settings.json";

/// Storage manager for persisted poster settings.
///
/// Loads and saves settings files from a centralized directory
/// (defaults to ~/.starmap_config/).
#[derive(Debug, Clone)]
pub struct SettingsStorage {
    /// Root directory for all settings (e.g., ~/.starmap_config)
    root_path: PathBuf,
}

impl SettingsStorage {
    /// Create a new settings storage with default path (~/.starmap_config)
    pub fn new() -> std::io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        let root_path = PathBuf::from(home).join(".starmap_config");
        Ok(Self { root_path })
    }

    /// Create a new settings storage with custom root path
    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn last_settings_path(&self) -> PathBuf {
        self.root_path.join(LAST_SETTINGS_FILE)
    }

    /// Get the settings saved by the last render.
    ///
    /// Returns None if nothing has been saved yet.
    /// Returns Some(Err) if the file exists but cannot be loaded.
    pub fn get_last_settings(&self) -> Option<Result<PosterSettings>> {
        let path = self.last_settings_path();

        if !path.exists() {
            return None;
        }

        Some(PosterSettings::load_from_file(&path))
    }

    /// Save settings as the last-used configuration.
    ///
    /// Creates the root directory if it doesn't exist.
    /// Returns the path where the settings were saved.
    pub fn save_last_settings(&self, settings: &PosterSettings) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.root_path)?;

        let path = self.last_settings_path();
        settings.save_to_file(&path)?;
        log::debug!("Saved poster settings to {}", path.display());
        Ok(path)
    }

    /// Delete the saved settings.
    ///
    /// Returns Ok(true) if the file was deleted, Ok(false) if it didn't exist.
    pub fn delete_last_settings(&self) -> Result<bool> {
        let path = self.last_settings_path();

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::starfield::StarStyle;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_last_settings() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path().join("nested"));

        assert!(storage.get_last_settings().is_none());

        let settings = PosterSettings {
            title: "First Date".to_string(),
            date: "2024-02-14".to_string(),
            style: StarStyle::Nebula,
            seed: Some(99),
            ..Default::default()
        };
        let path = storage.save_last_settings(&settings).unwrap();
        assert!(path.ends_with("last_map_settings.json"));

        let loaded = storage.get_last_settings().unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupt_settings_are_reported() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path().to_path_buf());
        std::fs::write(temp_dir.path().join(LAST_SETTINGS_FILE), "{not json").unwrap();

        assert!(matches!(
            storage.get_last_settings(),
            Some(Err(PosterError::Settings(_)))
        ));
    }

    #[test]
    fn test_delete_last_settings() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path().to_path_buf());

        assert!(!storage.delete_last_settings().unwrap());
        storage
            .save_last_settings(&PosterSettings::default())
            .unwrap();
        assert!(storage.delete_last_settings().unwrap());
        assert!(storage.get_last_settings().is_none());
    }
}
