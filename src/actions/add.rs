//! add action - Stage files into the git index

use serde::Deserialize;

use crate::git::Git;
use crate::ui::output;

use super::{ActionError, Context};

/// Input for the add action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddInput {
    /// The changed files to add to the git index; omit to add all changes
    #[serde(default)]
    pub files: Option<Vec<String>>,

    /// The directory containing the repository
    #[serde(default = "default_working_directory")]
    pub working_directory: String,
}

fn default_working_directory() -> String {
    ".".to_string()
}

impl AddInput {
    fn validate(&self) -> Result<(), ActionError> {
        if let Some(files) = &self.files {
            if files.iter().any(|file| file.is_empty()) {
                return Err(ActionError::invalid_input(["files"]));
            }
        }
        Ok(())
    }
}

/// Stage the named paths, or all changes when no files are given.
pub fn add(ctx: &Context, input: AddInput) -> Result<(), ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;
    let git = Git::open(&local_path)?;

    match &input.files {
        Some(files) => {
            for file in files {
                output::print(
                    format!("Adding file {} to the index", file),
                    ctx.verbosity,
                );
            }
            git.stage(Some(files))?;
        }
        None => {
            output::print("Adding all changes to the index", ctx.verbosity);
            git.stage(None)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_defaults_to_all_changes() {
        let parsed: AddInput = serde_json::from_str("{}").unwrap();
        assert!(parsed.files.is_none());
        assert_eq!(parsed.working_directory, ".");
    }

    #[test]
    fn empty_file_name_is_invalid() {
        let parsed: AddInput = serde_json::from_str(r#"{"files": ["ok.txt", ""]}"#).unwrap();
        assert!(matches!(
            parsed.validate(),
            Err(ActionError::InvalidInput { .. })
        ));
    }
}
