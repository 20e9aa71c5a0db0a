//! Configuration and settings management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub show_size: bool,
    #[serde(default = "default_true")]
    pub show_modified: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_size: true,
            show_modified: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogSettings {
    /// JSON catalog to browse instead of the database or the sample drive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; defaults to `minidrive.log` in the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from a file, or return defaults if file doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    /// Parsed log level, falling back to INFO on unknown names
    pub fn log_level(&self) -> tracing::Level {
        self.log.level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Where the log file goes, with `~` expanded
    pub fn log_path(&self) -> PathBuf {
        match &self.log.file {
            Some(file) => PathBuf::from(shellexpand::tilde(file).to_string()),
            None => app_dir().join("minidrive.log"),
        }
    }

    /// Configured JSON catalog path, with `~` expanded
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog
            .path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }

    /// Get the default settings file path
    pub fn default_path() -> PathBuf {
        app_dir().join("settings.toml")
    }
}

fn app_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "minidrive")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join("minidrive"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.ui.show_size);
        assert!(settings.ui.show_modified);
        assert!(settings.catalog.path.is_none());
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.ui.show_size = false;
        settings.catalog.path = Some("/tmp/drive.json".to_string());
        settings.log.level = "debug".to_string();

        settings.save(&settings_path).unwrap();

        let loaded = Settings::load(&settings_path).unwrap();
        assert!(!loaded.ui.show_size);
        assert!(loaded.ui.show_modified);
        assert_eq!(loaded.catalog_path(), Some(PathBuf::from("/tmp/drive.json")));
        assert_eq!(loaded.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("nonexistent.toml");

        let settings = Settings::load(&settings_path).unwrap();
        assert!(settings.ui.show_size);
        assert!(settings.catalog.path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.toml");
        std::fs::write(&settings_path, "[ui]\nshow_modified = false\n").unwrap();

        let settings = Settings::load(&settings_path).unwrap();
        assert!(settings.ui.show_size);
        assert!(!settings.ui.show_modified);
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.toml");
        std::fs::write(&settings_path, "[ui\nshow_size = ").unwrap();

        assert!(Settings::load(&settings_path).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let mut settings = Settings::default();
        settings.log.level = "chatty".to_string();
        assert_eq!(settings.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_settings_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.log.file = Some("/var/tmp/minidrive.log".to_string());
        settings.save(&settings_path).unwrap();

        let content = std::fs::read_to_string(&settings_path).unwrap();
        assert!(content.contains("show_size"));
        assert!(content.contains("show_modified"));
        assert!(content.contains("level"));
        assert!(content.contains("/var/tmp/minidrive.log"));
        assert!(!content.contains("path ="));
    }

    #[test]
    fn test_settings_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("subdir")
            .join("nested")
            .join("settings.toml");

        assert!(!nested_path.parent().unwrap().exists());

        let settings = Settings::default();
        settings.save(&nested_path).unwrap();

        assert!(nested_path.exists());

        let loaded = Settings::load(&nested_path).unwrap();
        assert!(loaded.ui.show_size);
    }

    #[test]
    fn test_explicit_log_path() {
        let mut settings = Settings::default();
        settings.log.file = Some("/var/log/drive.log".to_string());
        assert_eq!(settings.log_path(), PathBuf::from("/var/log/drive.log"));
        assert!(Settings::default()
            .log_path()
            .ends_with("minidrive/minidrive.log"));
    }

    #[test]
    fn test_default_files_share_app_dir() {
        let settings_path = Settings::default_path();
        let log_path = Settings::default().log_path();

        assert!(settings_path.ends_with("settings.toml"));
        assert_eq!(settings_path.parent(), log_path.parent());
        assert!(settings_path
            .components()
            .any(|c| c.as_os_str() == "minidrive"));
    }
}
