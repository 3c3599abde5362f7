//! Persistent configuration: the gateway address and the session log path.
//!
//! Stored as TOML under the platform config directory. A missing file loads
//! as defaults; read and parse failures carry the offending path. Saves go
//! through a temp file in the target directory and are persisted atomically.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Gateway base URL, e.g. `http://localhost:8000`.
    pub base_url: Option<String>,
    /// Session log file enabled at startup.
    pub log_file: Option<String>,
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn StdError>> {
        self.save_to_path(&Self::config_path())
    }

    pub(crate) fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError> { Box::new(err) })?;
        Ok(())
    }

    pub(crate) fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("", "", "relaychat")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    /// Prints every key, set or not, for `set`/`unset` feedback.
    pub fn print_all(&self) {
        println!(
            "base-url: {}",
            self.base_url.as_deref().unwrap_or("(not set)")
        );
        println!(
            "log-file: {}",
            self.log_file.as_deref().unwrap_or("(not set)")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_nonexistent_config_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nonexistent_config.toml");

        let config = Config::load_from_path(&config_path).expect("Failed to load config");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            base_url: Some("http://gateway.local:8000".to_string()),
            log_file: Some("session.log".to_string()),
        };
        config.save_to_path(&config_path).expect("save failed");

        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir
            .path()
            .join("nested")
            .join("dir")
            .join("config.toml");

        let config = Config {
            base_url: Some("http://localhost:9000".to_string()),
            log_file: None,
        };
        config.save_to_path(&config_path).expect("save failed");

        assert!(config_path.exists());
        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.base_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn invalid_toml_surfaces_a_parse_error_with_the_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "base_url = [not toml").expect("write failed");

        let err = Config::load_from_path(&config_path).expect_err("load should fail");
        let message = err.to_string();
        assert!(message.contains("Failed to parse config"));
        assert!(message.contains("config.toml"));
    }

    #[test]
    fn unset_keys_are_omitted_from_the_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        Config::default()
            .save_to_path(&config_path)
            .expect("save failed");

        let contents = fs::read_to_string(&config_path).expect("read failed");
        assert!(!contents.contains("base_url"));
        assert!(!contents.contains("log_file"));
    }
}
