//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and build the integration registry once
//! - Delegate to action handlers and emit their outputs
//!
//! The CLI layer is thin: all repository work happens in [`crate::actions`].
//!
//! # Async Actions
//!
//! The clone action is async because it may consult a provider's user-info
//! API. Dispatch runs it on a per-invocation tokio runtime via `block_on`;
//! everything else is synchronous.

pub mod args;

pub use args::{Cli, Command};

use anyhow::{Context as _, Result};

use crate::actions::{self, Context};
use crate::core::config::Config;
use crate::scm::ScmIntegrations;
use crate::ui::output;
use crate::ui::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let integrations = ScmIntegrations::from_config(&config.integrations);

    let ctx = Context {
        workspace: cli.workspace.clone(),
        verbosity,
    };

    dispatch(cli.command, &ctx, &integrations)
}

/// Dispatch a command to its action handler.
fn dispatch(command: Command, ctx: &Context, integrations: &ScmIntegrations) -> Result<()> {
    match command {
        Command::Clone {
            repository_url,
            working_directory,
            user_name,
            email,
        } => {
            let input = actions::CloneInput {
                repository_url,
                working_directory,
                user_name,
                email,
            };
            let rt = tokio::runtime::Runtime::new()?;
            let result = rt.block_on(actions::clone(ctx, integrations, input))?;
            output::emit(&result)?;
        }

        Command::Add {
            files,
            working_directory,
        } => {
            let files = if files.is_empty() { None } else { Some(files) };
            actions::add(
                ctx,
                actions::AddInput {
                    files,
                    working_directory,
                },
            )?;
        }

        Command::Commit {
            message,
            author_name,
            author_email,
            committer_name,
            committer_email,
            working_directory,
        } => {
            let input = actions::CommitInput {
                message,
                author: signature_from_flags(author_name, author_email),
                committer: signature_from_flags(committer_name, committer_email),
                working_directory,
            };
            let result = actions::commit(ctx, input)?;
            output::emit(&result)?;
        }

        Command::Checkout {
            branch_name,
            create,
            strategy,
            working_directory,
        } => {
            let input = actions::CheckoutInput {
                branch_name,
                should_create: create,
                strategy,
                working_directory,
            };
            let result = actions::checkout(ctx, input)?;
            output::emit(&result)?;
        }

        Command::Push {
            remote_name,
            working_directory,
            merge_push,
            merge_push_title,
            merge_push_target,
            merge_push_delete_source_branch,
        } => {
            let input = actions::PushInput {
                remote_name,
                working_directory,
                merge_push,
                merge_push_title,
                merge_push_target,
                merge_push_delete_source_branch,
            };
            actions::push(ctx, integrations, input)?;
        }

        Command::Run {
            command,
            remote_name,
            working_directory,
            args,
        } => {
            let input = actions::RunInput {
                command,
                args,
                remote_name,
                working_directory,
            };
            actions::run(ctx, integrations, input)?;
        }
    }

    Ok(())
}

/// Combine a pair of identity flags into a signature input.
///
/// A half-specified pair is passed through so input validation can name the
/// offending field rather than silently dropping it.
fn signature_from_flags(
    name: Option<String>,
    email: Option<String>,
) -> Option<actions::SignatureInput> {
    match (name, email) {
        (None, None) => None,
        (name, email) => Some(actions::SignatureInput {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_from_flags_requires_any_flag() {
        assert!(signature_from_flags(None, None).is_none());

        let full = signature_from_flags(Some("A".into()), Some("a@b.c".into())).unwrap();
        assert_eq!(full.name, "A");
        assert_eq!(full.email, "a@b.c");

        // Half-specified pairs survive so validation can flag them
        let half = signature_from_flags(Some("A".into()), None).unwrap();
        assert_eq!(half.email, "");
    }
}
