//! scm::registry
//!
//! Host parsing and the immutable integration registry.
//!
//! # Design
//!
//! The registry is built once at startup from configuration and passed
//! explicitly to every component that needs it; there is no ambient global
//! lookup. Resolution is by exact host match, GitLab entries before GitHub
//! entries, and a miss is `None`, not an error; callers decide whether an
//! unauthenticated operation is acceptable.
//!
//! # API base URLs
//!
//! Entries may omit `api_base_url`; the registry fills in the provider's
//! conventional endpoint:
//! - GitHub: `https://api.github.com` for `github.com`, else
//!   `https://<host>/api/v3` (GitHub Enterprise)
//! - GitLab: `https://<host>/api/v4`

use crate::core::config::IntegrationsConfig;

use super::traits::ScmError;

/// Schemes that require a non-empty host.
const SPECIAL_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// Extract the host component from a repository URL.
///
/// Returns the authority's host (with port, when present), case-preserved,
/// userinfo stripped. No normalization of case or trailing dots is
/// performed; callers must supply well-formed URLs. Non-special schemes
/// such as `file://` may carry an empty host; special schemes may not.
///
/// # Errors
///
/// - [`ScmError::InvalidUrl`] if the string has no scheme, or an empty host
///   where the scheme requires one
///
/// # Example
///
/// ```
/// use scaffgit::scm::parse_host_from_url;
///
/// let host = parse_host_from_url("https://github.com/org/repo.git").unwrap();
/// assert_eq!(host, "github.com");
/// ```
pub fn parse_host_from_url(url: &str) -> Result<String, ScmError> {
    let invalid = || ScmError::InvalidUrl {
        url: url.to_string(),
    };

    let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
    {
        return Err(invalid());
    }

    // The authority ends at the first path, query, or fragment delimiter.
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");

    // Drop userinfo, keep host[:port].
    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);

    if host.is_empty() && SPECIAL_SCHEMES.contains(&scheme) {
        return Err(invalid());
    }

    Ok(host.to_string())
}

/// One configured hosting integration, ready for use.
///
/// Immutable once loaded; owned by the process-wide [`ScmIntegrations`]
/// registry built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmIntegrationConfig {
    /// The host this entry is authoritative for
    pub host: String,
    /// Credential token, when configured
    pub token: Option<String>,
    /// Resolved API base URL (defaults applied)
    pub api_base_url: String,
}

/// A resolved integration, tagged by provider.
///
/// A closed variant set: adding a provider means adding a variant here and
/// a client in [`crate::scm::create_client`]; there is no runtime type
/// inspection anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmIntegration {
    /// GitHub (github.com or GitHub Enterprise)
    GitHub(ScmIntegrationConfig),
    /// GitLab (gitlab.com or self-hosted)
    GitLab(ScmIntegrationConfig),
}

impl ScmIntegration {
    /// The underlying configuration entry.
    pub fn config(&self) -> &ScmIntegrationConfig {
        match self {
            ScmIntegration::GitHub(config) | ScmIntegration::GitLab(config) => config,
        }
    }

    /// Provider name (matches configuration section names).
    pub fn provider(&self) -> &'static str {
        match self {
            ScmIntegration::GitHub(_) => "github",
            ScmIntegration::GitLab(_) => "gitlab",
        }
    }

    /// The host this integration is configured for.
    pub fn host(&self) -> &str {
        &self.config().host
    }

    /// The credential token, when configured.
    pub fn token(&self) -> Option<&str> {
        self.config().token.as_deref()
    }
}

/// Default GitHub API base URL (github.com).
const GITHUB_API_BASE: &str = "https://api.github.com";

/// The immutable integration registry.
///
/// # Example
///
/// ```
/// use scaffgit::core::config::Config;
/// use scaffgit::scm::ScmIntegrations;
///
/// let config: Config = toml::from_str(
///     r#"
///     [[integrations.github]]
///     host = "github.com"
///     token = "mocktoken"
///     "#,
/// )
/// .unwrap();
///
/// let integrations = ScmIntegrations::from_config(&config.integrations);
/// let resolved = integrations
///     .resolve("https://github.com/org/repo.git")
///     .unwrap()
///     .unwrap();
/// assert_eq!(resolved.provider(), "github");
/// assert_eq!(resolved.token(), Some("mocktoken"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScmIntegrations {
    github: Vec<ScmIntegrationConfig>,
    gitlab: Vec<ScmIntegrationConfig>,
}

impl ScmIntegrations {
    /// Build the registry from configuration, applying API base defaults.
    pub fn from_config(config: &IntegrationsConfig) -> Self {
        let github = config
            .github
            .iter()
            .map(|entry| ScmIntegrationConfig {
                host: entry.host.clone(),
                token: entry.token.clone(),
                api_base_url: entry.api_base_url.clone().unwrap_or_else(|| {
                    if entry.host == "github.com" {
                        GITHUB_API_BASE.to_string()
                    } else {
                        format!("https://{}/api/v3", entry.host)
                    }
                }),
            })
            .collect();

        let gitlab = config
            .gitlab
            .iter()
            .map(|entry| ScmIntegrationConfig {
                host: entry.host.clone(),
                token: entry.token.clone(),
                api_base_url: entry
                    .api_base_url
                    .clone()
                    .unwrap_or_else(|| format!("https://{}/api/v4", entry.host)),
            })
            .collect();

        Self { github, gitlab }
    }

    /// Look up a GitHub entry by exact host.
    pub fn github_by_host(&self, host: &str) -> Option<&ScmIntegrationConfig> {
        self.github.iter().find(|entry| entry.host == host)
    }

    /// Look up a GitLab entry by exact host.
    pub fn gitlab_by_host(&self, host: &str) -> Option<&ScmIntegrationConfig> {
        self.gitlab.iter().find(|entry| entry.host == host)
    }

    /// Look up any entry by exact host, GitLab before GitHub.
    pub fn by_host(&self, host: &str) -> Option<ScmIntegration> {
        if let Some(config) = self.gitlab_by_host(host) {
            return Some(ScmIntegration::GitLab(config.clone()));
        }
        self.github_by_host(host)
            .map(|config| ScmIntegration::GitHub(config.clone()))
    }

    /// Resolve the integration for a repository URL.
    ///
    /// Returns `Ok(None)` when no configured host matches; callers decide
    /// whether an unauthenticated operation is acceptable.
    ///
    /// # Errors
    ///
    /// - [`ScmError::InvalidUrl`] if the URL's host cannot be parsed
    pub fn resolve(&self, repository_url: &str) -> Result<Option<ScmIntegration>, ScmError> {
        let host = parse_host_from_url(repository_url)?;
        Ok(self.by_host(&host))
    }
}
