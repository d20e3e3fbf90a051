//! actions
//!
//! Template action adapters.
//!
//! # Architecture
//!
//! Each action is a straight sequential script: validate a typed input,
//! resolve a working directory inside the sandboxed workspace, perform one
//! git operation through [`crate::git::Git`] (plus provider lookups through
//! [`crate::scm`] where credentials or identity are involved), and return a
//! typed output that the CLI emits as JSON.
//!
//! Failures in input validation raise [`ActionError::InvalidInput`] naming
//! the offending fields; failures in the underlying git call propagate
//! unchanged, with no retry.

mod add;
mod checkout;
mod clone;
mod commit;
mod push;
mod run;

pub use add::{add, AddInput};
pub use checkout::{checkout, CheckoutInput, CheckoutOutput, CheckoutStrategy};
pub use clone::{clone, CloneInput, CloneOutput};
pub use commit::{commit, CommitInput, CommitOutput, SignatureInput};
pub use push::{push, PushInput};
pub use run::{run, RunInput};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::paths::{resolve_safe_child_path, PathError};
use crate::git::GitError;
use crate::scm::ScmError;
use crate::ui::Verbosity;

/// Errors from action execution.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input validation failed; lists the offending field names.
    #[error("invalid input: {}", fields.join(", "))]
    InvalidInput {
        /// The fields that failed validation
        fields: Vec<String>,
    },

    /// No identity could be determined for the repository config step.
    #[error(
        "no user info found: supply userName/email or configure an integration \
         token for the repository host"
    )]
    NoUserInfoFound,

    /// A spawned command exited with a non-zero status.
    #[error("command '{command}' failed with exit code {code}")]
    CommandFailed {
        /// The command that was run
        command: String,
        /// Its exit code (-1 when terminated by a signal)
        code: i32,
    },

    /// A command could not be spawned at all.
    #[error("failed to run '{command}': {source}")]
    SpawnFailed {
        /// The command that was attempted
        command: String,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Git operation failure, propagated unchanged.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Provider lookup or API failure, propagated unchanged.
    #[error(transparent)]
    Scm(#[from] ScmError),

    /// Workspace containment violation.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ActionError {
    /// Shorthand for an invalid-input error over the given fields.
    pub(crate) fn invalid_input<const N: usize>(fields: [&str; N]) -> Self {
        ActionError::InvalidInput {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Execution context shared by all actions.
///
/// Carries the sandboxed workspace root and the output verbosity. The
/// integration registry is passed separately, and only to the actions that
/// need it.
#[derive(Debug, Clone)]
pub struct Context {
    /// The workspace root all working directories resolve under
    pub workspace: PathBuf,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve a working directory safely below the workspace root.
    pub fn resolve(&self, working_directory: &str) -> Result<PathBuf, PathError> {
        resolve_safe_child_path(&self.workspace, working_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_lists_fields() {
        let err = ActionError::invalid_input(["repositoryUrl", "email"]);
        assert_eq!(format!("{}", err), "invalid input: repositoryUrl, email");
    }

    #[test]
    fn context_resolves_inside_workspace() {
        let ctx = Context {
            workspace: PathBuf::from("/ws"),
            verbosity: Verbosity::Quiet,
        };
        assert_eq!(ctx.resolve("sub").unwrap(), PathBuf::from("/ws/sub"));
        assert!(ctx.resolve("../out").is_err());
    }
}
