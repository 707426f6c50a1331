/// Application settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/recipe-book/settings.json
/// - macOS: ~/Library/Application Support/recipe-book/settings.json
/// - Windows: %APPDATA%\recipe-book\settings.json
///
/// A missing file means "use the defaults"; fields left out of the file fall
/// back to their defaults too.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::{EnvFilter, ParseError};

use crate::error::{Error, Result};

const APP_DIR: &str = "recipe-book";
const SETTINGS_FILENAME: &str = "settings.json";
const DB_FILENAME: &str = "recipes.db";
const SAMPLE_IMAGE_DIR: &str = "images";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Where the catalog lives. `None` means the per-user data directory.
    pub database_path: Option<PathBuf>,
    /// Insert the sample recipes when the catalog is empty
    pub seed_sample_data: bool,
    /// Folder searched for the sample recipes' pictures.
    /// `None` means the `images` folder next to the executable.
    pub sample_image_dir: Option<PathBuf>,
    /// `tracing` filter directive, e.g. "info" or "recipe_book=debug"
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            seed_sample_data: true,
            sample_image_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Default location of the settings file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILENAME))
    }

    /// Load settings from the default location, writing the defaults out on
    /// first launch so there is a file to edit
    pub fn load_or_create_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_or_create(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let settings = Self::default();
        settings.save(path)?;
        Ok(settings)
    }

    /// Load settings from `path`, or return defaults if the file doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to `path`, creating the parent directory if needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the catalog path.
    ///
    /// Without an explicit `database_path` this is:
    /// - Linux: ~/.local/share/recipe-book/recipes.db
    /// - macOS: ~/Library/Application Support/recipe-book/recipes.db
    /// - Windows: %APPDATA%\recipe-book\recipes.db
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(Error::NoDataDir)?;
        path.push(APP_DIR);
        path.push(DB_FILENAME);
        Ok(path)
    }

    /// Resolve the folder holding the sample pictures, if there is one
    pub fn sample_image_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.sample_image_dir {
            return Some(dir.clone());
        }

        let exe = std::env::current_exe().ok()?;
        exe.parent().map(|dir| dir.join(SAMPLE_IMAGE_DIR))
    }

    /// Parse `log_level` as a `tracing` filter directive
    pub fn log_filter(&self) -> std::result::Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.seed_sample_data);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let settings = Settings::from_json(r#"{ "seed_sample_data": false }"#).unwrap();

        assert!(!settings.seed_sample_data);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.database_path, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("settings.json");
        let settings = Settings {
            database_path: Some(dir.path().join("mine.db")),
            seed_sample_data: false,
            sample_image_dir: None,
            log_level: "debug".to_string(),
        };

        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_first_launch_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipe-book").join("settings.json");

        let settings = Settings::load_or_create(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        // An edited file is respected afterwards
        fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();
        let settings = Settings::load_or_create(&path).unwrap();
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_sample_image_dir_defaults_next_to_executable() {
        let dir = Settings::default().sample_image_dir().unwrap();

        assert!(dir.is_absolute());
        assert!(dir.ends_with("images"));

        let settings = Settings {
            sample_image_dir: Some(PathBuf::from("/srv/pictures")),
            ..Settings::default()
        };
        assert_eq!(
            settings.sample_image_dir(),
            Some(PathBuf::from("/srv/pictures"))
        );
    }

    #[test]
    fn test_log_filter_reports_bad_directives() {
        assert!(Settings::default().log_filter().is_ok());

        let settings = Settings {
            log_level: "recipe_book=notalevel".to_string(),
            ..Settings::default()
        };
        assert!(settings.log_filter().is_err());
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let settings = Settings {
            database_path: Some(PathBuf::from("/tmp/elsewhere.db")),
            ..Settings::default()
        };
        assert_eq!(
            settings.database_path().unwrap(),
            PathBuf::from("/tmp/elsewhere.db")
        );
    }
}
