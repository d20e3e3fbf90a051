//! checkout action - Switch to a branch, optionally creating it

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::git::{CheckoutMode, CommitRecord, Git};
use crate::ui::output;

use super::{ActionError, Context};

/// Working-tree strategy names accepted by the checkout action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStrategy {
    /// Don't touch the working tree
    None,
    /// Only make safe updates
    #[default]
    Safe,
    /// Overwrite local changes
    Force,
    /// Also recreate missing files
    RecreateMissing,
    /// Proceed despite conflicts
    AllowConflicts,
}

impl From<CheckoutStrategy> for CheckoutMode {
    fn from(strategy: CheckoutStrategy) -> Self {
        match strategy {
            CheckoutStrategy::None => CheckoutMode::None,
            CheckoutStrategy::Safe => CheckoutMode::Safe,
            CheckoutStrategy::Force => CheckoutMode::Force,
            CheckoutStrategy::RecreateMissing => CheckoutMode::RecreateMissing,
            CheckoutStrategy::AllowConflicts => CheckoutMode::AllowConflicts,
        }
    }
}

/// Input for the checkout action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckoutInput {
    /// The branch to checkout
    pub branch_name: String,

    /// Whether to create the branch at the current head before switching
    #[serde(default)]
    pub should_create: bool,

    /// The checkout strategy to use
    #[serde(default)]
    pub strategy: CheckoutStrategy,

    /// The directory containing the repository
    #[serde(default = "default_working_directory")]
    pub working_directory: String,
}

fn default_working_directory() -> String {
    ".".to_string()
}

/// Output of the checkout action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutput {
    /// The head commit after the checkout
    pub head: CommitRecord,
}

impl CheckoutInput {
    fn validate(&self) -> Result<(), ActionError> {
        if self.branch_name.is_empty() {
            return Err(ActionError::invalid_input(["branchName"]));
        }
        Ok(())
    }
}

/// Check out a branch, creating it first when requested.
pub fn checkout(ctx: &Context, input: CheckoutInput) -> Result<CheckoutOutput, ActionError> {
    input.validate()?;

    let local_path = ctx.resolve(&input.working_directory)?;
    let git = Git::open(&local_path)?;

    if input.should_create {
        output::print(
            format!("Creating branch {}", input.branch_name),
            ctx.verbosity,
        );
        git.create_branch(&input.branch_name)?;
    }

    output::print(
        format!("Switching to branch {}", input.branch_name),
        ctx.verbosity,
    );
    git.checkout_branch(&input.branch_name, input.strategy.into())?;

    let head = git.head_record()?;
    output::print(
        format!("Checked out branch {} at {}", input.branch_name, head.sha),
        ctx.verbosity,
    );

    Ok(CheckoutOutput { head })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_default_is_safe() {
        assert_eq!(CheckoutStrategy::default(), CheckoutStrategy::Safe);
    }

    #[test]
    fn strategy_names_deserialize_snake_case() {
        let parsed: CheckoutStrategy = serde_json::from_str(r#""recreate_missing""#).unwrap();
        assert_eq!(parsed, CheckoutStrategy::RecreateMissing);
        let parsed: CheckoutStrategy = serde_json::from_str(r#""allow_conflicts""#).unwrap();
        assert_eq!(parsed, CheckoutStrategy::AllowConflicts);
    }

    #[test]
    fn strategy_maps_onto_checkout_mode() {
        assert_eq!(CheckoutMode::from(CheckoutStrategy::None), CheckoutMode::None);
        assert_eq!(
            CheckoutMode::from(CheckoutStrategy::Force),
            CheckoutMode::Force
        );
        assert_eq!(
            CheckoutMode::from(CheckoutStrategy::RecreateMissing),
            CheckoutMode::RecreateMissing
        );
    }

    #[test]
    fn empty_branch_name_is_invalid() {
        let input: CheckoutInput = serde_json::from_str(r#"{"branchName": ""}"#).unwrap();
        assert!(matches!(
            input.validate(),
            Err(ActionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn input_defaults() {
        let input: CheckoutInput = serde_json::from_str(r#"{"branchName": "feature"}"#).unwrap();
        assert!(!input.should_create);
        assert_eq!(input.strategy, CheckoutStrategy::Safe);
        assert_eq!(input.working_directory, ".");
    }
}
