//! scm::traits
//!
//! Client trait and shared types for hosting-provider APIs.
//!
//! # Design
//!
//! The `ScmClient` trait is async because provider operations involve
//! network I/O. Implementations are constructed from a resolved integration
//! (token + API base URL) and never discover endpoints themselves.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from hosting-provider lookups and API calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScmError {
    /// A repository URL could not be parsed into a host.
    #[error("invalid repository url: {url}")]
    InvalidUrl {
        /// The unparseable URL
        url: String,
    },

    /// The provider API answered with a non-2xx status.
    #[error("{provider} API error: {status}")]
    ApiError {
        /// Provider display name
        provider: &'static str,
        /// HTTP status text (e.g. "Forbidden")
        status: String,
    },

    /// The provider API answered 2xx but the body was not the expected shape.
    #[error("{provider} API returned an unexpected body: {message}")]
    InvalidResponse {
        /// Provider display name
        provider: &'static str,
        /// Description of the parse failure
        message: String,
    },

    /// Transport-level failure before any HTTP status was received.
    #[error("{provider} network error: {message}")]
    Network {
        /// Provider display name
        provider: &'static str,
        /// The transport error message
        message: String,
    },

    /// An integration matched but carries no token.
    #[error("no token configured for host '{host}'")]
    NoToken {
        /// The host whose integration is tokenless
        host: String,
    },
}

/// The authenticated user's identity as reported by a provider.
///
/// Either field may be absent: GitHub hides non-public emails, and a user
/// may have no primary email flagged at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    /// Login / username
    pub user_name: Option<String>,
    /// Primary email address
    pub email: Option<String>,
}

/// A hosting-provider API client.
///
/// One implementation per provider; both answer the same question: who is
/// the user this token belongs to?
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait ScmClient: Send + Sync {
    /// Provider name (e.g. "github", "gitlab").
    fn provider(&self) -> &'static str;

    /// Fetch the authenticated user's login and email.
    ///
    /// # Errors
    ///
    /// - [`ScmError::ApiError`] on a non-2xx response, carrying the status text
    /// - [`ScmError::Network`] on transport failures
    async fn get_user_info(&self) -> Result<UserInfo, ScmError>;
}
