use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::export::ExportFormat;
use crate::logging::LogConfig;
use crate::models::PersonProfile;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default body measurements when none are given on the command line
    pub profile: PersonProfile,

    /// Logging settings
    pub logging: LogConfig,

    /// Output preferences
    pub output: OutputSettings,
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Export format used when it cannot be inferred from the file name
    pub default_export: ExportFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_export: ExportFormat::Csv,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("steptracker")
            .join("config.toml")
    }

    /// Load configuration from `path` (or the default location), falling back
    /// to defaults when the file is missing or unreadable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %format!("{:#}", err),
                    "Ignoring unusable config file"
                );
                Self::default()
            }
        }
    }

    /// Check that the stored profile is usable by the formulas
    pub fn validate(&self) -> crate::Result<()> {
        self.profile.validate().map_err(|err| {
            TrackerError::Configuration(format!("invalid profile: {}", err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.profile, PersonProfile::default());
        assert_eq!(config.output.default_export, ExportFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.profile = PersonProfile::new(62.5, 1.68).unwrap();
        config.logging.level = LogLevel::Debug;
        config.output.default_export = ExportFormat::Json;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[profile]\nweight_kg = 90.0\nheight_m = 1.9\n").unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.profile.weight_kg, 90.0);
        assert_eq!(loaded.logging, LogConfig::default());
        assert_eq!(loaded.output, OutputSettings::default());
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[profile]\nweight_kg = -3.0\nheight_m = 1.9\n").unwrap();

        assert!(AppConfig::load_from_file(&path).is_err());
        assert_eq!(AppConfig::load_or_default(Some(path.as_path())), AppConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(AppConfig::load_or_default(Some(path.as_path())), AppConfig::default());
    }
}
