//! clone action - Clone a repository into the workspace and configure identity

use serde::{Deserialize, Serialize};

use crate::git::{CommitIdentity, CommitRecord, Git, GitError};
use crate::scm::{create_client, parse_host_from_url, CredentialSource, ScmError, ScmIntegration, ScmIntegrations};
use crate::ui::output;

use super::{ActionError, Context};

/// Input for the clone action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CloneInput {
    /// The URL of the repository to clone
    pub repository_url: String,

    /// The directory to clone the repository into
    #[serde(default = "default_working_directory")]
    pub working_directory: String,

    /// Identity name to write into the repository config, overriding the
    /// provider lookup
    #[serde(default)]
    pub user_name: Option<String>,

    /// Identity email to write into the repository config, overriding the
    /// provider lookup
    #[serde(default)]
    pub email: Option<String>,
}

fn default_working_directory() -> String {
    "./".to_string()
}

/// Output of the clone action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneOutput {
    /// The branch checked out by the clone
    pub default_branch: String,
    /// The head commit of the fresh clone
    pub head: CommitRecord,
}

impl CloneInput {
    fn validate(&self) -> Result<(), ActionError> {
        let mut fields = Vec::new();
        if parse_host_from_url(&self.repository_url).is_err() {
            fields.push("repositoryUrl".to_string());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                fields.push("email".to_string());
            }
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ActionError::InvalidInput { fields })
        }
    }
}

/// Clone a repository, then write the committer identity into its config.
///
/// The identity is taken per-field from the input when given, otherwise from
/// the resolved integration's user-info client. With neither source
/// available the action fails with [`ActionError::NoUserInfoFound`]; later
/// commit actions depend on this config being present.
pub async fn clone(
    ctx: &Context,
    integrations: &ScmIntegrations,
    input: CloneInput,
) -> Result<CloneOutput, ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;
    let integration = integrations.resolve(&input.repository_url)?;
    if let Some(integration) = &integration {
        output::debug(
            format!(
                "resolved {} integration for host '{}'",
                integration.provider(),
                integration.host()
            ),
            ctx.verbosity,
        );
    }
    let credentials = CredentialSource::for_integration(integration.as_ref());

    if !credentials.is_authenticated() {
        let host = parse_host_from_url(&input.repository_url)?;
        output::warn(
            format!(
                "no credentials found for host '{}'; attempting unauthenticated clone",
                host
            ),
            ctx.verbosity,
        );
    }

    output::print(
        format!(
            "Cloning {} into {}",
            input.repository_url,
            local_path.display()
        ),
        ctx.verbosity,
    );
    let git = Git::clone(&input.repository_url, &local_path, &credentials)?;

    let identity = resolve_identity(&input, integration.as_ref()).await?;
    git.set_user(&identity.name, &identity.email)?;
    output::print(
        format!("Configured repository identity {}", identity),
        ctx.verbosity,
    );

    let default_branch = git
        .current_branch()?
        .map(|branch| branch.name)
        .ok_or(GitError::NotOnBranch)?;
    let head = git.head_record()?;
    output::print(
        format!("Cloned {} at {}", default_branch, head.sha),
        ctx.verbosity,
    );

    Ok(CloneOutput {
        default_branch,
        head,
    })
}

/// Determine the identity to write into the clone's config.
///
/// Explicit input fields win; the integration's user-info client fills the
/// gaps. A tokenless integration simply contributes nothing.
async fn resolve_identity(
    input: &CloneInput,
    integration: Option<&ScmIntegration>,
) -> Result<CommitIdentity, ActionError> {
    let mut user_name = input.user_name.clone();
    let mut email = input.email.clone();

    if user_name.is_none() || email.is_none() {
        if let Some(integration) = integration {
            match create_client(integration) {
                Ok(client) => {
                    let info = client.get_user_info().await?;
                    user_name = user_name.or(info.user_name);
                    email = email.or(info.email);
                }
                Err(ScmError::NoToken { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    match (user_name, email) {
        (Some(name), Some(email)) => Ok(CommitIdentity { name, email }),
        _ => Err(ActionError::NoUserInfoFound),
    }
}
