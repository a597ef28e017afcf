//! Application configuration
//!
//! Settings are stored as RON in the platform config directory. Loading
//! never fails the application: a missing or broken file yields defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ofc_cad::ModelingOptions;
use ofc_renderer::{ColorScheme, RendererConfig};

/// Config file name inside the config directory
const CONFIG_FILE_NAME: &str = "config.ron";

/// Errors for loading and saving the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config directory available on this platform")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// UI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

impl UiTheme {
    /// Matching viewport palette
    pub fn color_scheme(self) -> ColorScheme {
        match self {
            UiTheme::Dark => ColorScheme::Dark,
            UiTheme::Light => ColorScheme::Light,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    /// Width of the control column at startup
    pub controls_width: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            // A quarter of the default 1200px window
            controls_width: 300.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub modeling: ModelingOptions,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Owns the configuration and where it is persisted
pub struct ConfigManager {
    config: AppConfig,
    path: Option<PathBuf>,
}

/// Configuration shared between the app and its panels
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

impl ConfigManager {
    /// Manager with default settings that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            config: AppConfig::default(),
            path: None,
        }
    }

    /// Load from the platform config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            tracing::warn!("No config directory, using default settings");
            return Self::in_memory();
        };

        match Self::load_from(&path) {
            Ok(manager) => manager,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Failed to load config from {:?}: {}", path, e);
                } else {
                    tracing::debug!("No config at {:?}, using defaults", path);
                }
                Self {
                    config: AppConfig::default(),
                    path: Some(path),
                }
            }
        }
    }

    /// Load from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = ron::from_str(&content)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Manager that persists to `path`, starting from defaults
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: AppConfig::default(),
            path: Some(path.into()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the configuration. In-memory managers do nothing.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content =
            ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::default();
    }

    /// Wrap in a [`SharedConfig`]
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

/// `<config dir>/config.ron` for this application
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "OpenFusionCAD", "openfusioncad")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut manager = ConfigManager::with_path(&path);
        manager.config_mut().ui.theme = UiTheme::Light;
        manager.config_mut().modeling.sweep_radius = 8.0;
        manager.save().unwrap();

        let loaded = ConfigManager::load_from(&path).unwrap();
        assert_eq!(loaded.config().ui.theme, UiTheme::Light);
        assert_eq!(loaded.config().modeling.sweep_radius, 8.0);
        assert_eq!(loaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(ui: (theme: Light))").unwrap();

        let loaded = ConfigManager::load_from(&path).unwrap();
        assert_eq!(loaded.config().ui.theme, UiTheme::Light);
        assert_eq!(loaded.config().ui.controls_width, 300.0);
        assert_eq!(loaded.config().modeling, ModelingOptions::default());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not ron at all {").unwrap();
        assert!(matches!(
            ConfigManager::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut manager = ConfigManager::in_memory();
        manager.config_mut().ui.theme = UiTheme::Light;
        assert!(manager.save().is_ok());
        manager.reset_to_defaults();
        assert_eq!(manager.config(), &AppConfig::default());
    }
}
