//! User configuration loaded from TOML.
//!
//! Every key is optional; a missing file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::FoldPolicy;
use crate::history::{FileHistory, HistoryError};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid fold policy: width {width} must be between 1 and threshold {threshold}")]
    FoldPolicy { threshold: usize, width: usize },

    #[error("caret blink period must be greater than zero")]
    BlinkPeriod,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: FoldPolicy,
    pub commit: CommitConfig,
    pub history: HistoryConfig,
    pub caret: CaretConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Carry `12` rather than `12.0` forward on commit.
    pub trim_zero_fraction: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            trim_zero_fraction: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Defaults to the user's data directory.
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// The configured history file, if history is enabled.
    pub fn open(&self) -> Result<Option<FileHistory>, HistoryError> {
        if !self.enabled {
            return Ok(None);
        }
        let path = match &self.path {
            Some(path) => path.clone(),
            None => FileHistory::default_path()?,
        };
        Ok(Some(FileHistory::new(path)))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    pub enabled: bool,
    pub blink_ms: u64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blink_ms: 500,
        }
    }
}

impl CaretConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }
}

impl Config {
    /// `config.toml` in the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    tracing::debug!("no config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::parse(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.format.is_valid() {
            return Err(ConfigError::FoldPolicy {
                threshold: self.format.threshold,
                width: self.format.width,
            });
        }
        if self.caret.blink_ms == 0 {
            return Err(ConfigError::BlinkPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format, FoldPolicy::standard());
        assert!(config.commit.trim_zero_fraction);
        assert!(config.history.enabled);
        assert_eq!(config.caret.period(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            [format]
            threshold = 3
            width = 3

            [commit]
            trim_zero_fraction = false
            "#,
        )
        .unwrap();

        assert_eq!(config.format, FoldPolicy::compact());
        assert!(!config.commit.trim_zero_fraction);
        assert_eq!(config.caret, CaretConfig::default());
    }

    #[test]
    fn test_invalid_fold_policy() {
        let err = Config::parse("[format]\nthreshold = 2\nwidth = 4\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FoldPolicy {
                threshold: 2,
                width: 4
            }
        ));
    }

    #[test]
    fn test_zero_blink_rejected() {
        let err = Config::parse("[caret]\nblink_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::BlinkPeriod));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::parse("[format\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join(CONFIG_FILE).as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[history]\nenabled = false\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(!config.history.enabled);
        assert!(config.history.open().unwrap().is_none());
    }

    #[test]
    fn test_history_path_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calc.jsonl");
        let config = HistoryConfig {
            enabled: true,
            path: Some(path.clone()),
        };
        assert_eq!(config.open().unwrap().unwrap().path(), path.as_path());
    }
}
