//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--workspace <path>`: The sandboxed workspace root (default `.`)
//! - `--config <path>`: Config file override
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::actions::CheckoutStrategy;

/// scaffgit - template git actions for a scaffolding workspace
#[derive(Parser, Debug)]
#[command(name = "scaffgit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace root that all working directories resolve under
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands, one per template action.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clone a git repository into the workspace
    #[command(
        long_about = "Clone a git repository into the workspace.\n\n\
            Credentials are taken from the integration matching the repository \
            URL's host; without one the clone is attempted unauthenticated. \
            After cloning, the repository's user.name/user.email config is \
            written from the explicit flags or from the provider's user info, \
            so later commits have an identity to fall back to."
    )]
    Clone {
        /// The URL of the repository to clone
        #[arg(long)]
        repository_url: String,

        /// The directory to clone the repository into
        #[arg(long, default_value = "./")]
        working_directory: String,

        /// Identity name for the repository config (overrides provider lookup)
        #[arg(long)]
        user_name: Option<String>,

        /// Identity email for the repository config (overrides provider lookup)
        #[arg(long)]
        email: Option<String>,
    },

    /// Add files to the git index
    Add {
        /// A file to add to the index; repeat for more, omit to add all changes
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<String>,

        /// The directory containing the repository
        #[arg(long, default_value = ".")]
        working_directory: String,
    },

    /// Commit changes to a git repository
    Commit {
        /// The message of the commit
        #[arg(long)]
        message: String,

        /// The name of the author (defaults to the repo's git config)
        #[arg(long)]
        author_name: Option<String>,

        /// The email of the author (defaults to the repo's git config)
        #[arg(long)]
        author_email: Option<String>,

        /// The name of the committer (defaults to the repo's git config)
        #[arg(long)]
        committer_name: Option<String>,

        /// The email of the committer (defaults to the repo's git config)
        #[arg(long)]
        committer_email: Option<String>,

        /// The directory containing the repository
        #[arg(long, default_value = ".")]
        working_directory: String,
    },

    /// Checkout a git branch
    Checkout {
        /// The branch to checkout
        #[arg(long)]
        branch_name: String,

        /// Create the branch at the current head before switching
        #[arg(long)]
        create: bool,

        /// The checkout strategy to use
        #[arg(long, value_enum, default_value = "safe")]
        strategy: CheckoutStrategy,

        /// The directory containing the repository
        #[arg(long, default_value = ".")]
        working_directory: String,
    },

    /// Push the current branch to a remote
    Push {
        /// The remote to push to
        #[arg(long, default_value = "origin")]
        remote_name: String,

        /// The directory containing the repository
        #[arg(long, default_value = ".")]
        working_directory: String,

        /// Ask the remote to open a merge request for the push
        #[arg(long)]
        merge_push: bool,

        /// The title of the merge request
        #[arg(long, default_value = "")]
        merge_push_title: String,

        /// The target branch to merge into
        #[arg(long, default_value = "master")]
        merge_push_target: String,

        /// Whether to delete the source branch after merging
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        merge_push_delete_source_branch: bool,
    },

    /// Run a command in the workspace
    #[command(
        long_about = "Run a command in the workspace.\n\n\
            The literal placeholder 'token' in the command or its arguments is \
            replaced with the token of the integration matching the configured \
            remote's host. When the directory is not a repository or nothing \
            matches, the command runs unsubstituted."
    )]
    Run {
        /// The command to run
        #[arg(long, default_value = "git")]
        command: String,

        /// The remote whose URL selects the integration token
        #[arg(long, default_value = "origin")]
        remote_name: String,

        /// The directory to run the command in
        #[arg(long, default_value = ".")]
        working_directory: String,

        /// Arguments to pass to the command (after `--`)
        #[arg(last = true)]
        args: Vec<String>,
    },
}
