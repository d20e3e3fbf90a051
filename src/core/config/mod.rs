//! core::config
//!
//! Configuration loading.
//!
//! # Overview
//!
//! Configuration declares the hosting-provider integrations (host, token,
//! API base URL) that actions use to authenticate git and API calls. The
//! file is TOML and is loaded once at startup; the resulting registry is
//! immutable and passed explicitly to the components that need it.
//!
//! # Locations
//!
//! Searched in order, first hit wins:
//! 1. `--config <path>` CLI flag (must exist)
//! 2. `$SCAFFGIT_CONFIG` if set (must exist)
//! 3. `$XDG_CONFIG_HOME/scaffgit/config.toml`
//! 4. `~/.scaffgit/config.toml`
//!
//! A missing file at the searched locations is not an error; the tool then
//! runs with no integrations and operations degrade to unauthenticated
//! attempts.
//!
//! # Example
//!
//! ```no_run
//! use scaffgit::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("github entries: {}", config.integrations.github.len());
//! ```

pub mod schema;

pub use schema::{Config, IntegrationEntry, IntegrationsConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration, optionally from an explicit path.
    ///
    /// An explicit path (CLI flag or `$SCAFFGIT_CONFIG`) must exist;
    /// the default locations may be absent, in which case an empty
    /// configuration is returned.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if an explicit path does not exist
    /// - [`ConfigError::ReadError`] / [`ConfigError::ParseError`] on IO or
    ///   TOML failures
    /// - [`ConfigError::InvalidValue`] if the parsed config fails validation
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_file(path);
        }

        if let Ok(env_path) = std::env::var("SCAFFGIT_CONFIG") {
            let path = PathBuf::from(env_path);
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            return Self::load_file(&path);
        }

        for candidate in Self::default_locations() {
            if candidate.exists() {
                return Self::load_file(&candidate);
            }
        }

        Ok(Config::default())
    }

    /// Default config file locations, in precedence order.
    fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            locations.push(PathBuf::from(xdg).join("scaffgit").join("config.toml"));
        } else if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("scaffgit").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            locations.push(home.join(".scaffgit").join("config.toml"));
        }

        locations
    }

    /// Read and parse a single config file, then validate it.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/scaffgit.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn explicit_path_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [[integrations.github]]
            host = "github.com"
            token = "mocktoken"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.integrations.github[0].host, "github.com");
    }

    #[test]
    fn invalid_file_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not valid toml [").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
