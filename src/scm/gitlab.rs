//! scm::gitlab
//!
//! GitLab user-info client using the REST API.
//!
//! # Design
//!
//! A single `GET {base}/user` answers both the username and the email.
//!
//! # Authentication
//!
//! Personal access tokens (recognized by their `glpat-` prefix) are sent
//! as `Private-Token`; anything else is assumed to be an OAuth token and
//! sent as a bearer `Authorization` header.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

use super::traits::{ScmClient, ScmError, UserInfo};

/// Provider display name used in errors.
const PROVIDER: &str = "GitLab";

/// Prefix marking a GitLab personal access token.
const PAT_PREFIX: &str = "glpat-";

/// The authorization header to use for a given token.
///
/// # Example
///
/// ```
/// use scaffgit::scm::gitlab::authorization_header;
///
/// assert_eq!(
///     authorization_header("glpat-abc"),
///     ("Private-Token", "glpat-abc".to_string())
/// );
/// assert_eq!(
///     authorization_header("oauth-token"),
///     ("Authorization", "Bearer oauth-token".to_string())
/// );
/// ```
pub fn authorization_header(token: &str) -> (&'static str, String) {
    if token.starts_with(PAT_PREFIX) {
        ("Private-Token", token.to_string())
    } else {
        ("Authorization", format!("Bearer {}", token))
    }
}

#[derive(Debug, Deserialize)]
struct GitLabUser {
    username: String,
    email: Option<String>,
}

/// GitLab user-info client.
///
/// Constructed from a resolved integration's token and API base URL; the
/// client never discovers endpoints itself.
pub struct GitLabClient {
    /// HTTP client for making requests
    client: Client,
    /// Integration token
    token: String,
    /// API base URL (for self-hosted GitLab)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitLabClient {
    /// Create a new client from a token and API base URL.
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl ScmClient for GitLabClient {
    fn provider(&self) -> &'static str {
        "gitlab"
    }

    async fn get_user_info(&self) -> Result<UserInfo, ScmError> {
        let url = format!("{}/user", self.api_base);
        let (header_name, header_value) = authorization_header(&self.token);

        let response = self
            .client
            .get(&url)
            .header(header_name, header_value)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ScmError::Network {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScmError::ApiError {
                provider: PROVIDER,
                status: status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.as_str().to_string()),
            });
        }

        let user: GitLabUser =
            response.json().await.map_err(|e| ScmError::InvalidResponse {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(UserInfo {
            user_name: Some(user.username),
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod authorization_header {
        use super::*;

        #[test]
        fn personal_access_token_uses_private_token() {
            let (name, value) = authorization_header("glpat-s3cr3t");
            assert_eq!(name, "Private-Token");
            assert_eq!(value, "glpat-s3cr3t");
        }

        #[test]
        fn other_tokens_use_bearer() {
            let (name, value) = authorization_header("some-oauth-token");
            assert_eq!(name, "Authorization");
            assert_eq!(value, "Bearer some-oauth-token");
        }

        #[test]
        fn prefix_must_match_exactly() {
            let (name, _) = authorization_header("GLPAT-uppercase");
            assert_eq!(name, "Authorization");
        }
    }

    #[test]
    fn new_stores_api_base() {
        let client = GitLabClient::new("glpat-x", "https://gitlab.com/api/v4");
        assert_eq!(client.api_base(), "https://gitlab.com/api/v4");
        assert_eq!(client.provider(), "gitlab");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = GitLabClient::new("glpat-secret", "https://gitlab.com/api/v4");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("glpat-secret"));
    }
}
