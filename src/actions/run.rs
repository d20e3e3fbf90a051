//! run action - Run an arbitrary command inside the workspace

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::git::Git;
use crate::scm::ScmIntegrations;
use crate::ui::output;

use super::{ActionError, Context};

/// Placeholder in the command string that is replaced with the resolved
/// integration token.
const TOKEN_PLACEHOLDER: &str = "token";

/// Input for the run action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunInput {
    /// The command to run
    #[serde(default = "default_command")]
    pub command: String,

    /// The arguments to pass to the command
    #[serde(default)]
    pub args: Vec<String>,

    /// The remote whose URL selects the integration token
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// The directory to run the command in
    #[serde(default = "default_working_directory")]
    pub working_directory: String,
}

fn default_command() -> String {
    "git".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_working_directory() -> String {
    ".".to_string()
}

impl RunInput {
    fn validate(&self) -> Result<(), ActionError> {
        if self.command.is_empty() {
            return Err(ActionError::invalid_input(["command"]));
        }
        Ok(())
    }
}

/// Substitute the token placeholder in the command and arguments.
///
/// Returns the command line unchanged when no token is available.
fn substitute_token(input: &RunInput, token: Option<&str>) -> (String, Vec<String>) {
    match token {
        Some(token) => (
            input.command.replace(TOKEN_PLACEHOLDER, token),
            input
                .args
                .iter()
                .map(|arg| arg.replace(TOKEN_PLACEHOLDER, token))
                .collect(),
        ),
        None => (input.command.clone(), input.args.clone()),
    }
}

/// Resolve the integration token for the repository's configured remote.
fn remote_token(
    local_path: &Path,
    remote_name: &str,
    integrations: &ScmIntegrations,
) -> Result<Option<String>, ActionError> {
    let git = Git::open(local_path)?;
    let remote_url = git.remote_url(remote_name)?;
    let integration = integrations.resolve(&remote_url)?;
    Ok(integration.and_then(|integration| integration.token().map(String::from)))
}

/// Run a command in the workspace, substituting the integration token.
///
/// Token resolution is best-effort: when the directory is not a repository,
/// the remote is missing, or no integration matches, the failure is logged
/// and the command runs unsubstituted. A non-zero exit is an error carrying
/// the exit code.
pub fn run(
    ctx: &Context,
    integrations: &ScmIntegrations,
    input: RunInput,
) -> Result<(), ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;

    let token = match remote_token(&local_path, &input.remote_name, integrations) {
        Ok(token) => token,
        Err(e) => {
            output::error(format!("failed to resolve an integration token: {}", e));
            None
        }
    };
    let (command, args) = substitute_token(&input, token.as_deref());

    // Log the unsubstituted form so tokens never reach the output.
    output::print(
        format!("Running {} in {}", input.command, local_path.display()),
        ctx.verbosity,
    );

    let result = Command::new(&command)
        .args(&args)
        .current_dir(&local_path)
        .output()
        .map_err(|source| ActionError::SpawnFailed {
            command: input.command.clone(),
            source,
        })?;

    for line in String::from_utf8_lossy(&result.stdout).lines() {
        output::print(format!("stdout: {}", line), ctx.verbosity);
    }
    for line in String::from_utf8_lossy(&result.stderr).lines() {
        output::print(format!("stderr: {}", line), ctx.verbosity);
    }

    if !result.status.success() {
        return Err(ActionError::CommandFailed {
            command: input.command,
            code: result.status.code().unwrap_or(-1),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(command: &str, args: &[&str]) -> RunInput {
        RunInput {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            remote_name: "origin".to_string(),
            working_directory: ".".to_string(),
        }
    }

    #[test]
    fn input_defaults() {
        let parsed: RunInput = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.command, "git");
        assert!(parsed.args.is_empty());
        assert_eq!(parsed.remote_name, "origin");
    }

    #[test]
    fn empty_command_is_invalid() {
        assert!(matches!(
            input("", &[]).validate(),
            Err(ActionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn token_placeholder_is_substituted_everywhere() {
        let (command, args) = substitute_token(
            &input("curl", &["-u", "token:x-oauth-basic", "https://example.com"]),
            Some("s3cr3t"),
        );
        assert_eq!(command, "curl");
        assert_eq!(args[1], "s3cr3t:x-oauth-basic");
    }

    #[test]
    fn no_token_leaves_the_command_line_unchanged() {
        let (command, args) = substitute_token(&input("echo", &["token"]), None);
        assert_eq!(command, "echo");
        assert_eq!(args, vec!["token"]);
    }
}
