//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Overrides the config directory (used by tests and portable installs)
pub const CONFIG_DIR_ENV: &str = "CFPANEL_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session";

/// Rejected `config set` input
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Unknown config key: {0}\n\n\
         Available keys:\n  \
         url           - Backend URL (e.g. http://127.0.0.1:5000)\n  \
         output_format - Default output format (pretty/json/csv/yaml)\n  \
         username      - Name shown in the dashboard header\n  \
         timeout_secs  - Request timeout in seconds"
    )]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Backend URL.
    pub url: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Username of the last successful login.
    pub username: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Directory holding the config file and saved session.
    pub fn dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let dirs = ProjectDirs::from("dev", "cfpanel", "cfpanel").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().to_path_buf())
    }

    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Apply one `config set` assignment.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "url" => self.url = Some(value.to_string()),
            "output_format" | "output" => {
                self.output_format = Some(value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "output_format",
                    value: value.to_string(),
                })?);
            }
            "username" | "user" => self.username = Some(value.to_string()),
            "timeout_secs" | "timeout" => {
                self.timeout_secs = Some(value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "timeout_secs",
                    value: value.to_string(),
                })?);
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// The saved session cookie, stored beside the config file.
pub struct Session;

impl Session {
    fn path() -> Result<PathBuf> {
        Ok(Config::dir()?.join(SESSION_FILE))
    }

    /// The saved `Cookie` header, if any.
    pub fn load() -> Result<Option<String>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }

        let cookie = std::fs::read_to_string(path)?.trim().to_string();
        Ok((!cookie.is_empty()).then_some(cookie))
    }

    /// Persist a `Cookie` header.
    pub fn save(cookie: &str) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, cookie)?;
        Ok(())
    }

    /// Forget the saved session.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("url", "http://panel.local:5000").unwrap();
        config.set("output", "yaml").unwrap();
        config.set("timeout_secs", "5").unwrap();

        assert_eq!(config.url.as_deref(), Some("http://panel.local:5000"));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("api_key", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("timeout_secs", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_toml_layout() {
        let config = Config {
            url: Some("http://127.0.0.1:5000".into()),
            output_format: Some(OutputFormat::Json),
            username: Some("admin".into()),
            timeout_secs: None,
        };

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("output_format = \"json\""));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
