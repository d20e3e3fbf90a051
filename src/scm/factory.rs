//! scm::factory
//!
//! Client construction from a resolved integration.
//!
//! # Design
//!
//! This is the single place where an integration variant is mapped to a
//! concrete HTTP client. Actions call [`create_client`] rather than
//! importing provider implementations directly, so the set of providers
//! stays closed and the boundary stays in one file.

use super::github::GithubClient;
use super::gitlab::GitLabClient;
use super::registry::ScmIntegration;
use super::traits::{ScmClient, ScmError};

/// Create the user-info client for a resolved integration.
///
/// # Errors
///
/// - [`ScmError::NoToken`] if the integration has no token; identity
///   lookups are always authenticated
///
/// # Example
///
/// ```
/// use scaffgit::scm::{create_client, ScmIntegration, ScmIntegrationConfig};
///
/// let integration = ScmIntegration::GitHub(ScmIntegrationConfig {
///     host: "github.com".to_string(),
///     token: Some("mocktoken".to_string()),
///     api_base_url: "https://api.github.com".to_string(),
/// });
///
/// let client = create_client(&integration).unwrap();
/// assert_eq!(client.provider(), "github");
/// ```
pub fn create_client(integration: &ScmIntegration) -> Result<Box<dyn ScmClient>, ScmError> {
    let config = integration.config();
    let token = config.token.as_ref().ok_or_else(|| ScmError::NoToken {
        host: config.host.clone(),
    })?;

    Ok(match integration {
        ScmIntegration::GitHub(_) => Box::new(GithubClient::new(
            token.as_str(),
            config.api_base_url.as_str(),
        )),
        ScmIntegration::GitLab(_) => Box::new(GitLabClient::new(
            token.as_str(),
            config.api_base_url.as_str(),
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scm::registry::ScmIntegrationConfig;

    fn config(token: Option<&str>) -> ScmIntegrationConfig {
        ScmIntegrationConfig {
            host: "example.com".to_string(),
            token: token.map(String::from),
            api_base_url: "https://example.com/api".to_string(),
        }
    }

    #[test]
    fn github_integration_yields_github_client() {
        let client = create_client(&ScmIntegration::GitHub(config(Some("t")))).unwrap();
        assert_eq!(client.provider(), "github");
    }

    #[test]
    fn gitlab_integration_yields_gitlab_client() {
        let client = create_client(&ScmIntegration::GitLab(config(Some("t")))).unwrap();
        assert_eq!(client.provider(), "gitlab");
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = create_client(&ScmIntegration::GitHub(config(None)));
        assert!(matches!(result, Err(ScmError::NoToken { .. })));
    }
}
