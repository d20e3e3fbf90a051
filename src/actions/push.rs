//! push action - Push the current branch to a remote

use serde::Deserialize;

use crate::git::{Git, GitError};
use crate::scm::{CredentialSource, ScmIntegrations};
use crate::ui::output;

use super::{ActionError, Context};

/// Input for the push action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PushInput {
    /// The remote to push to
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// The directory containing the repository
    #[serde(default = "default_working_directory")]
    pub working_directory: String,

    /// Whether to ask the remote to open a merge request for the push
    #[serde(default)]
    pub merge_push: bool,

    /// The title of the merge request
    #[serde(default)]
    pub merge_push_title: String,

    /// The target branch to merge into
    #[serde(default = "default_merge_push_target")]
    pub merge_push_target: String,

    /// Whether to delete the source branch after merging
    #[serde(default = "default_true")]
    pub merge_push_delete_source_branch: bool,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_working_directory() -> String {
    ".".to_string()
}

fn default_merge_push_target() -> String {
    "master".to_string()
}

fn default_true() -> bool {
    true
}

impl PushInput {
    fn validate(&self) -> Result<(), ActionError> {
        let mut fields = Vec::new();
        if self.remote_name.is_empty() {
            fields.push("remoteName".to_string());
        }
        if self.merge_push && self.merge_push_target.is_empty() {
            fields.push("mergePushTarget".to_string());
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ActionError::InvalidInput { fields })
        }
    }
}

/// Build the `git push -o` option strings for a merge-request push.
///
/// Empty unless `merge_push` is set. The title is only included when
/// non-empty, and `remove_source_branch` only when requested; GitLab treats
/// the bare option name as true and has no false form.
pub(crate) fn merge_push_options(input: &PushInput) -> Vec<String> {
    if !input.merge_push {
        return Vec::new();
    }

    let mut options = vec!["merge_request.create".to_string()];
    if !input.merge_push_title.is_empty() {
        options.push(format!("merge_request.title={}", input.merge_push_title));
    }
    options.push(format!("merge_request.target={}", input.merge_push_target));
    if input.merge_push_delete_source_branch {
        options.push("merge_request.remove_source_branch".to_string());
    }
    options
}

/// Push the current branch to the configured remote.
///
/// Credentials come from the integration matching the remote URL's host; a
/// miss degrades to a warning and an unauthenticated attempt.
pub fn push(
    ctx: &Context,
    integrations: &ScmIntegrations,
    input: PushInput,
) -> Result<(), ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;
    let git = Git::open(&local_path)?;

    output::print(format!("Using remote {}", input.remote_name), ctx.verbosity);
    let remote_url = git.remote_url(&input.remote_name)?;
    output::print(format!("Remote found at {}", remote_url), ctx.verbosity);

    let branch = git.current_branch()?.ok_or(GitError::NotOnBranch)?;
    output::print(format!("Pushing branch {}", branch.name), ctx.verbosity);

    let integration = integrations.resolve(&remote_url)?;
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
        output::warn(
            format!(
                "no credentials found for remote '{}'; attempting unauthenticated push",
                input.remote_name
            ),
            ctx.verbosity,
        );
    }

    let refspec = format!("{0}:{0}", branch.refname);
    let options = merge_push_options(&input);
    git.push(&input.remote_name, &refspec, &credentials, &options)?;

    output::print(
        format!("Pushed {} to {}", branch.name, input.remote_name),
        ctx.verbosity,
    );
    Ok(())
}
