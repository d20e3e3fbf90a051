//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Integrations
//!
//! Hosting-provider integrations are declared per provider, one entry per
//! host. The API base URL may be omitted and is defaulted at registry
//! construction time (see [`crate::scm::ScmIntegrations::from_config`]).
//!
//! # Validation
//!
//! Config values are validated after parsing so a malformed file fails
//! loudly at startup rather than at first lookup.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Top-level configuration.
///
/// # Example
///
/// ```toml
/// [[integrations.github]]
/// host = "github.com"
/// token = "ghp_xxx"
///
/// [[integrations.gitlab]]
/// host = "gitlab.example.com"
/// token = "glpat-xxx"
/// api_base_url = "https://gitlab.example.com/api/v4"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hosting-provider integrations
    pub integrations: IntegrationsConfig,
}

impl Config {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.integrations.validate()
    }
}

/// Integration entries, grouped by provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationsConfig {
    /// GitHub entries (github.com or GitHub Enterprise hosts)
    pub github: Vec<IntegrationEntry>,

    /// GitLab entries (gitlab.com or self-hosted)
    pub gitlab: Vec<IntegrationEntry>,
}

impl IntegrationsConfig {
    /// Validate all entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in self.github.iter().chain(self.gitlab.iter()) {
            entry.validate()?;
        }
        Ok(())
    }
}

/// A single configured hosting integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationEntry {
    /// The host this entry is authoritative for (exact match, e.g. "github.com")
    pub host: String,

    /// Credential token for this host
    pub token: Option<String>,

    /// API base URL override (defaulted per provider when omitted)
    pub api_base_url: Option<String>,
}

impl IntegrationEntry {
    /// Validate a single entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "integration host cannot be empty".to_string(),
            ));
        }
        if self.host.contains('/') {
            return Err(ConfigError::InvalidValue(format!(
                "integration host '{}' must be a bare host, not a URL",
                self.host
            )));
        }
        if let Some(url) = &self.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base_url '{}' must be an http(s) URL",
                    url
                )));
            }
        }
        Ok(())
    }
}
