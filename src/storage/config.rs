//! Configuration management
//!
//! TOML file at `~/.config/stampcard-cli/config.toml`. A missing file, or
//! missing sections and keys, fall back to the built-in defaults.

use super::Result;
use crate::display::TableStyle;
use crate::error::StorageError;
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://your-api-url.com/api/v1";
pub const DEFAULT_AUTH_TYPE: &str = "U";
pub const DEFAULT_LIMIT: u32 = 1000;
pub const DEFAULT_MAX_LIMIT: u32 = 10_000;
pub const DEFAULT_TITLE: &str = "RedCat Stamp Card Reporting";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub reports: ReportSettings,
    pub display: DisplaySettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub auth_type: String,
    /// Unset means the HTTP client never times out
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_type: DEFAULT_AUTH_TYPE.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportSettings {
    pub default_limit: u32,
    pub max_limit: u32,
    pub auto_export: bool,
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            auto_export: false,
            export_dir: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub title: String,
    pub style: TableStyle,
    pub colors: bool,
    pub max_width: Option<usize>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            style: TableStyle::Plain,
            colors: true,
            max_width: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        Ok(home_dir
            .join(".config")
            .join("stampcard-cli")
            .join("config.toml"))
    }

    /// Base URL: explicit override (flag or STAMPCARD_API_URL), then the
    /// file, then the built-in placeholder.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}
