//! commit action - Commit the staged index

use serde::{Deserialize, Serialize};

use crate::git::{CommitIdentity, CommitRecord, Git};
use crate::ui::output;

use super::{ActionError, Context};

/// An explicit author or committer override.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignatureInput {
    /// The name of the signer
    pub name: String,
    /// The email of the signer
    pub email: String,
}

impl From<SignatureInput> for CommitIdentity {
    fn from(input: SignatureInput) -> Self {
        CommitIdentity {
            name: input.name,
            email: input.email,
        }
    }
}

/// Input for the commit action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitInput {
    /// The message of the commit
    pub message: String,

    /// The author of the commit; defaults to the repository's configured
    /// identity (set by the clone action)
    #[serde(default)]
    pub author: Option<SignatureInput>,

    /// The committer of the commit; defaults like the author
    #[serde(default)]
    pub committer: Option<SignatureInput>,

    /// The directory containing the repository
    #[serde(default = "default_working_directory")]
    pub working_directory: String,
}

fn default_working_directory() -> String {
    ".".to_string()
}

/// Output of the commit action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutput {
    /// The new head commit
    pub head: CommitRecord,
}

impl CommitInput {
    fn validate(&self) -> Result<(), ActionError> {
        let mut fields = Vec::new();
        if self.message.is_empty() {
            fields.push("message".to_string());
        }
        if let Some(author) = &self.author {
            if author.name.is_empty() || !author.email.contains('@') {
                fields.push("author".to_string());
            }
        }
        if let Some(committer) = &self.committer {
            if committer.name.is_empty() || !committer.email.contains('@') {
                fields.push("committer".to_string());
            }
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ActionError::InvalidInput { fields })
        }
    }
}

/// Commit the staged index, defaulting signatures to the repo config.
pub fn commit(ctx: &Context, input: CommitInput) -> Result<CommitOutput, ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;
    let git = Git::open(&local_path)?;

    let configured = git.configured_identity();
    let author: Option<CommitIdentity> = input
        .author
        .clone()
        .map(Into::into)
        .or_else(|| configured.clone());
    let committer: Option<CommitIdentity> =
        input.committer.clone().map(Into::into).or_else(|| configured);

    if let Some(author) = &author {
        output::print(format!("Using author {}", author), ctx.verbosity);
    }
    if let Some(committer) = &committer {
        output::print(format!("Using committer {}", committer), ctx.verbosity);
    }

    let head = git.commit(&input.message, author.as_ref(), committer.as_ref())?;
    output::print(format!("Committed {}", head.sha), ctx.verbosity);

    Ok(CommitOutput { head })
}
