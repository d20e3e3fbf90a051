//! scm::credentials
//!
//! Credential selection by resolved integration.
//!
//! # Design
//!
//! A [`CredentialSource`] is a plain value describing how a git network
//! operation should authenticate. It is captured by the calling action and
//! passed by reference into the clone/push call; the git layer turns it
//! into a transport credentials closure that libgit2 invokes lazily and
//! possibly more than once per operation. The source itself carries no
//! state and the conversion is side-effect-free, so repeated invocations
//! always yield the same credential.
//!
//! # Username conventions
//!
//! Token credentials are username/password pairs with a fixed conventional
//! username, chosen per provider to match what each API expects for HTTPS
//! token auth: GitLab uses `oauth2`, GitHub uses `x-oauth-basic`. The
//! token is always the password.

use super::registry::ScmIntegration;

/// Conventional username for GitLab HTTPS token auth.
pub const GITLAB_TOKEN_USERNAME: &str = "oauth2";

/// Conventional username for GitHub HTTPS token auth.
pub const GITHUB_TOKEN_USERNAME: &str = "x-oauth-basic";

/// How a git network operation authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Username/password-style credentials carrying an integration token.
    Token {
        /// Fixed conventional username for the provider
        username: &'static str,
        /// The integration token, used as the password
        token: String,
    },

    /// The platform's default mechanism (SSH agent / credential helper).
    Default,
}

impl CredentialSource {
    /// Select credentials for a resolved integration.
    ///
    /// An integration with a token yields [`CredentialSource::Token`] with
    /// the provider's username convention; no integration, or an
    /// integration without a token, falls back to
    /// [`CredentialSource::Default`].
    pub fn for_integration(integration: Option<&ScmIntegration>) -> Self {
        match integration {
            Some(ScmIntegration::GitLab(config)) => match &config.token {
                Some(token) => CredentialSource::Token {
                    username: GITLAB_TOKEN_USERNAME,
                    token: token.clone(),
                },
                None => CredentialSource::Default,
            },
            Some(ScmIntegration::GitHub(config)) => match &config.token {
                Some(token) => CredentialSource::Token {
                    username: GITHUB_TOKEN_USERNAME,
                    token: token.clone(),
                },
                None => CredentialSource::Default,
            },
            None => CredentialSource::Default,
        }
    }

    /// Whether this source carries an explicit token.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, CredentialSource::Token { .. })
    }
}
