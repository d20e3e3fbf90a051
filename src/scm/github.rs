//! scm::github
//!
//! GitHub user-info client using the REST API.
//!
//! # Design
//!
//! Two endpoints are involved:
//! - `GET {base}/user`: login and (public) email
//! - `GET {base}/user/emails`: fallback when the primary email is not
//!   public; the entry flagged `primary` is selected, and when none is
//!   flagged the email stays unknown
//!
//! The fallback request is only made when the first response carries no
//! email, so the common case is a single round trip.
//!
//! # Authentication
//!
//! Requests send `Authorization: token {token}` and the v3 JSON accept
//! header. A User-Agent is always set; the GitHub API rejects requests
//! without one.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use super::traits::{ScmClient, ScmError, UserInfo};

/// Provider display name used in errors.
const PROVIDER: &str = "GitHub";

/// Accept header value for the v3 REST API.
const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "scaffgit";

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    #[serde(default)]
    primary: bool,
}

/// GitHub user-info client.
///
/// Constructed from a resolved integration's token and API base URL; the
/// client never discovers endpoints itself.
pub struct GithubClient {
    /// HTTP client for making requests
    client: Client,
    /// Integration token
    token: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GithubClient {
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

    /// Perform an authenticated GET and decode the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ScmError> {
        let url = format!("{}/{}", self.api_base, path);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, ACCEPT_VALUE)
            .header(USER_AGENT, USER_AGENT_VALUE)
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
                status: status_text(status),
            });
        }

        response.json().await.map_err(|e| ScmError::InvalidResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ScmClient for GithubClient {
    fn provider(&self) -> &'static str {
        "github"
    }

    async fn get_user_info(&self) -> Result<UserInfo, ScmError> {
        let user: GithubUser = self.get_json("user").await?;

        let email = match user.email {
            Some(email) => Some(email),
            None => {
                let emails: Vec<GithubEmail> = self.get_json("user/emails").await?;
                emails
                    .into_iter()
                    .find(|entry| entry.primary)
                    .map(|entry| entry.email)
            }
        };

        Ok(UserInfo {
            user_name: Some(user.login),
            email,
        })
    }
}

/// Render a status as its reason phrase (e.g. "Forbidden").
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stores_api_base() {
        let client = GithubClient::new("ghp_x", "https://api.github.com");
        assert_eq!(client.api_base(), "https://api.github.com");
        assert_eq!(client.provider(), "github");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = GithubClient::new("ghp_secret", "https://api.github.com");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("ghp_secret"));
    }

    #[test]
    fn status_text_uses_reason_phrase() {
        assert_eq!(status_text(reqwest::StatusCode::FORBIDDEN), "Forbidden");
        assert_eq!(status_text(reqwest::StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn email_entries_default_primary_to_false() {
        let entry: GithubEmail = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert!(!entry.primary);
    }
}
