//! scm
//!
//! Hosting-provider integrations: registry, credentials, and API clients.
//!
//! # Architecture
//!
//! - `registry`: host parsing and the immutable integration registry,
//!   resolved by exact host match (GitLab entries before GitHub entries)
//! - `credentials`: selection of git transport credentials from a resolved
//!   integration
//! - `traits`: the `ScmClient` contract shared by provider clients
//! - [`github`] / [`gitlab`]: the two user-info client implementations
//! - `factory`: the single place mapping an integration variant to a client
//!
//! The registry is built once at startup and passed explicitly to every
//! component that needs it; there is no ambient global lookup.
//!
//! # Example
//!
//! ```no_run
//! use scaffgit::core::config::Config;
//! use scaffgit::scm::{create_client, CredentialSource, ScmIntegrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let integrations = ScmIntegrations::from_config(&config.integrations);
//!
//! let integration = integrations.resolve("https://github.com/org/repo.git")?;
//! let credentials = CredentialSource::for_integration(integration.as_ref());
//!
//! if let Some(integration) = integration {
//!     let client = create_client(&integration)?;
//!     let info = client.get_user_info().await?;
//!     println!("{:?} {:?}", info.user_name, info.email);
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;
mod factory;
pub mod github;
pub mod gitlab;
mod registry;
mod traits;

pub use credentials::{CredentialSource, GITHUB_TOKEN_USERNAME, GITLAB_TOKEN_USERNAME};
pub use factory::create_client;
pub use registry::{parse_host_from_url, ScmIntegration, ScmIntegrationConfig, ScmIntegrations};
pub use traits::{ScmClient, ScmError, UserInfo};
