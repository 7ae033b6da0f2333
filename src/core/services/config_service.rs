use crate::display::TableStyle;
use crate::error::{AppError, ConfigError};
use crate::storage::config::Config;
use crate::utils::validation::{parse_positive, validate_url};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// User-facing configuration keys accepted by `config set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    AuthType,
    DefaultLimit,
    MaxLimit,
    AutoExport,
    ExportDir,
    Style,
    Colors,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::BaseUrl,
        ConfigKey::AuthType,
        ConfigKey::DefaultLimit,
        ConfigKey::MaxLimit,
        ConfigKey::AutoExport,
        ConfigKey::ExportDir,
        ConfigKey::Style,
        ConfigKey::Colors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::AuthType => "auth-type",
            ConfigKey::DefaultLimit => "default-limit",
            ConfigKey::MaxLimit => "max-limit",
            ConfigKey::AutoExport => "auto-export",
            ConfigKey::ExportDir => "export-dir",
            ConfigKey::Style => "style",
            ConfigKey::Colors => "colors",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s || key.as_str().replace('-', "_") == s)
            .ok_or_else(|| ConfigError::UnknownKey { key: s.to_string() })
    }
}

/// Configuration service for reading and updating the config file
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Current value of `key`, rendered the way `config show` prints it
    pub fn get(&self, key: ConfigKey) -> String {
        let c = &self.config;
        match key {
            ConfigKey::BaseUrl => c
                .api
                .base_url
                .clone()
                .unwrap_or_else(|| "(not set)".to_string()),
            ConfigKey::AuthType => c.api.auth_type.clone(),
            ConfigKey::DefaultLimit => c.reports.default_limit.to_string(),
            ConfigKey::MaxLimit => c.reports.max_limit.to_string(),
            ConfigKey::AutoExport => c.reports.auto_export.to_string(),
            ConfigKey::ExportDir => c
                .reports
                .export_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(current directory)".to_string()),
            ConfigKey::Style => c.display.style.to_string(),
            ConfigKey::Colors => c.display.colors.to_string(),
        }
    }

    /// Validate and apply one value. Nothing is written until `save_config`.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), AppError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let c = &mut self.config;

        match key {
            ConfigKey::BaseUrl => {
                validate_url(value)?;
                c.api.base_url = Some(value.trim_end_matches('/').to_string());
            }
            ConfigKey::AuthType => {
                if value.trim().is_empty() {
                    return Err(invalid("auth type cannot be empty").into());
                }
                c.api.auth_type = value.trim().to_string();
            }
            ConfigKey::DefaultLimit => {
                let limit = parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?;
                if limit > c.reports.max_limit {
                    return Err(invalid("larger than max-limit").into());
                }
                c.reports.default_limit = limit;
            }
            ConfigKey::MaxLimit => {
                let max = parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?;
                if max < c.reports.default_limit {
                    return Err(invalid("smaller than default-limit").into());
                }
                c.reports.max_limit = max;
            }
            ConfigKey::AutoExport => {
                c.reports.auto_export = value
                    .parse()
                    .map_err(|_| invalid("expected true or false"))?;
            }
            ConfigKey::ExportDir => {
                c.reports.export_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            ConfigKey::Style => {
                c.display.style = TableStyle::from_str(value)
                    .map_err(|_| invalid("expected plain or boxed"))?;
            }
            ConfigKey::Colors => {
                c.display.colors = value
                    .parse()
                    .map_err(|_| invalid("expected true or false"))?;
            }
        }

        log::debug!("Config {} set to {}", key, value);
        Ok(())
    }

    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }
}
