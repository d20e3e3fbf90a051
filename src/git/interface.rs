//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations. Every
//! action performs its repository work through this interface, which provides
//! structured results and normalizes errors into typed failure categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a Git repository.
//! No other module should import `git2` directly. This ensures:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - A single place where credential callbacks are wired into the transport
//!
//! # Credentials
//!
//! Network operations (clone, push) take a [`CredentialSource`] by reference.
//! The source is converted into a `git2::RemoteCallbacks` credentials closure
//! that libgit2 invokes lazily, possibly several times per operation
//! (handshake, redirect, retry). The closure constructs a fresh credential on
//! every call and has no other side effects.
//!
//! # Example
//!
//! ```ignore
//! use scaffgit::git::Git;
//! use scaffgit::scm::CredentialSource;
//! use std::path::Path;
//!
//! let git = Git::clone(
//!     "https://github.com/org/repo.git",
//!     Path::new("./checkout"),
//!     &CredentialSource::Default,
//! )?;
//! let head = git.head_record()?;
//! println!("cloned at {}", head.sha);
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::scm::CredentialSource;

/// Errors from Git operations.
///
/// These error types cover the categories of Git failures the actions need
/// to handle distinctly; everything else is surfaced as [`GitError::Internal`]
/// with the underlying libgit2 message.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// HEAD has no commits yet (freshly initialized repository).
    #[error("HEAD is unborn: the repository has no commits")]
    UnbornHead,

    /// A local branch does not exist.
    #[error("branch not found: {name}")]
    BranchNotFound {
        /// The branch that was not found
        name: String,
    },

    /// HEAD is detached or unborn where a branch is required.
    #[error("not currently on a branch")]
    NotOnBranch,

    /// A configured remote does not exist.
    #[error("remote not found: {name}")]
    RemoteNotFound {
        /// The remote that was not found
        name: String,
    },

    /// A remote exists but carries no fetch URL.
    #[error("remote '{name}' has no URL")]
    RemoteWithoutUrl {
        /// The remote missing a URL
        name: String,
    },

    /// A required identity key is absent from git config.
    #[error("git config '{key}' is not set")]
    MissingIdentity {
        /// The config key that was not set
        key: String,
    },

    /// Clone failed.
    #[error("failed to clone '{url}': {message}")]
    CloneFailed {
        /// The URL being cloned
        url: String,
        /// The underlying error message
        message: String,
    },

    /// Push failed.
    #[error("push to '{remote}' failed: {message}")]
    PushFailed {
        /// The remote being pushed to
        remote: String,
        /// The underlying error message
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        GitError::Internal {
            message: format!("{}: {}", context, err.message()),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// A commit participant: name and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl CommitIdentity {
    fn from_signature(signature: &git2::Signature<'_>) -> Self {
        Self {
            name: signature.name().unwrap_or_default().to_string(),
            email: signature.email().unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for CommitIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A plain record of a commit, emitted as action output.
///
/// The `date` is the author time rendered as ISO-8601 UTC with a trailing
/// `Z` and millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Full commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author identity
    pub author: CommitIdentity,
    /// Committer identity
    pub committer: CommitIdentity,
    /// Author time, ISO-8601 UTC
    pub date: String,
}

impl CommitRecord {
    /// Build a record from a commit handle.
    ///
    /// Pure mapping: reads from the handle, never mutates it. Callers must
    /// ensure a valid commit exists (see [`Git::head_record`] for the
    /// unborn-HEAD handling).
    pub fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let committer = commit.committer();

        let date = chrono::DateTime::<chrono::Utc>::from_timestamp(author.when().seconds(), 0)
            .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_default();

        Self {
            sha: commit.id().to_string(),
            message: commit.message().unwrap_or_default().to_string(),
            author: CommitIdentity::from_signature(&author),
            committer: CommitIdentity::from_signature(&committer),
            date,
        }
    }
}

/// Working-tree update strategy for checkout.
///
/// Mirrors libgit2's checkout strategies; `Safe` is the default used when
/// nothing else is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutMode {
    /// Don't update the working tree (dry run)
    None,
    /// Only update files that are safe to update
    #[default]
    Safe,
    /// Overwrite working tree changes
    Force,
    /// Recreate missing files in addition to safe updates
    RecreateMissing,
    /// Proceed even when the update would conflict
    AllowConflicts,
}

impl CheckoutMode {
    fn builder(&self) -> git2::build::CheckoutBuilder<'static> {
        let mut builder = git2::build::CheckoutBuilder::new();
        match self {
            CheckoutMode::None => {
                builder.dry_run();
            }
            CheckoutMode::Safe => {
                builder.safe();
            }
            CheckoutMode::Force => {
                builder.force();
            }
            CheckoutMode::RecreateMissing => {
                builder.safe().recreate_missing(true);
            }
            CheckoutMode::AllowConflicts => {
                builder.safe().allow_conflicts(true);
            }
        }
        builder
    }
}

/// The branch HEAD currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentBranch {
    /// Branch shorthand (e.g. "main")
    pub name: String,
    /// Full ref name (e.g. "refs/heads/main")
    pub refname: String,
}

/// Build remote callbacks whose credentials closure draws from `credentials`.
///
/// The closure is invoked lazily by libgit2 and may run more than once per
/// operation; it constructs a fresh `Cred` on each call.
fn remote_callbacks(credentials: &CredentialSource) -> git2::RemoteCallbacks<'_> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username_from_url, _allowed| match credentials {
        CredentialSource::Token { username, token } => {
            git2::Cred::userpass_plaintext(username, token)
        }
        CredentialSource::Default => git2::Cred::default(),
    });
    callbacks
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. All repository
/// reads and writes flow through this interface. No other module should
/// import `git2` directly.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Cloning
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Clone a repository into `path`, authenticating via `credentials`.
    ///
    /// # Errors
    ///
    /// - [`GitError::CloneFailed`] with the transport's message on failure
    pub fn clone(
        url: &str,
        path: &Path,
        credentials: &CredentialSource,
    ) -> Result<Self, GitError> {
        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(credentials));

        let repo = git2::build::RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(url, path)
            .map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                message: e.message().to_string(),
            })?;

        Ok(Self { repo })
    }

    // =========================================================================
    // Head and Branches
    // =========================================================================

    /// Get the HEAD commit, normalized to a [`CommitRecord`].
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if the repository has no commits yet
    pub fn head_record(&self) -> Result<CommitRecord, GitError> {
        let commit = self.head_commit()?;
        Ok(CommitRecord::from_commit(&commit))
    }

    /// Resolve HEAD to its commit.
    fn head_commit(&self) -> Result<git2::Commit<'_>, GitError> {
        let head = self.repo.head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound => GitError::UnbornHead,
            _ => GitError::from_git2(e, "HEAD"),
        })?;

        head.peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))
    }

    /// Get the branch HEAD points at.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<CurrentBranch>, GitError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        if head.is_branch() {
            if let (Some(shorthand), Some(refname)) = (head.shorthand(), head.name()) {
                return Ok(Some(CurrentBranch {
                    name: shorthand.to_string(),
                    refname: refname.to_string(),
                }));
            }
        }

        Ok(None) // Detached HEAD
    }

    /// Create a local branch at the current HEAD commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if there is no commit to branch from
    pub fn create_branch(&self, name: &str) -> Result<(), GitError> {
        let commit = self.head_commit()?;
        self.repo
            .branch(name, &commit, false)
            .map_err(|e| GitError::from_git2(e, name))?;
        Ok(())
    }

    /// Check out a local branch, updating the working tree per `mode`.
    ///
    /// # Errors
    ///
    /// - [`GitError::BranchNotFound`] if the branch does not exist
    pub fn checkout_branch(&self, name: &str, mode: CheckoutMode) -> Result<(), GitError> {
        let branch = self
            .repo
            .find_branch(name, git2::BranchType::Local)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::BranchNotFound {
                    name: name.to_string(),
                },
                _ => GitError::from_git2(e, name),
            })?;

        let refname = branch
            .get()
            .name()
            .ok_or_else(|| GitError::Internal {
                message: format!("branch '{}' has a non-utf8 ref name", name),
            })?
            .to_string();

        let target = branch
            .get()
            .peel(git2::ObjectType::Commit)
            .map_err(|e| GitError::from_git2(e, &refname))?;

        self.repo
            .checkout_tree(&target, Some(&mut mode.builder()))
            .map_err(|e| GitError::from_git2(e, &refname))?;
        self.repo
            .set_head(&refname)
            .map_err(|e| GitError::from_git2(e, &refname))?;

        Ok(())
    }

    // =========================================================================
    // Index
    // =========================================================================

    /// Stage paths into the index, or all changes when `files` is `None`.
    ///
    /// The index is re-read from disk first so staging observes the current
    /// working tree, then written back.
    pub fn stage(&self, files: Option<&[String]>) -> Result<(), GitError> {
        let mut index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;
        index
            .read(true)
            .map_err(|e| GitError::from_git2(e, "index"))?;

        match files {
            Some(files) => {
                for file in files {
                    index
                        .add_path(Path::new(file))
                        .map_err(|e| GitError::from_git2(e, file))?;
                }
            }
            None => {
                index
                    .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
                    .map_err(|e| GitError::from_git2(e, "add_all"))?;
            }
        }

        index.write().map_err(|e| GitError::from_git2(e, "index"))
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Create a commit from the current index.
    ///
    /// Author and committer fall back to the repository's configured
    /// `user.name` / `user.email` when not supplied. The current head commit
    /// becomes the sole parent; an unborn HEAD yields a parentless commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingIdentity`] if a fallback identity key is unset
    pub fn commit(
        &self,
        message: &str,
        author: Option<&CommitIdentity>,
        committer: Option<&CommitIdentity>,
    ) -> Result<CommitRecord, GitError> {
        let author_sig = self.signature_for(author)?;
        let committer_sig = self.signature_for(committer)?;

        let mut index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;
        index
            .read(true)
            .map_err(|e| GitError::from_git2(e, "index"))?;
        let tree_oid = index
            .write_tree()
            .map_err(|e| GitError::from_git2(e, "write_tree"))?;
        let tree = self
            .repo
            .find_tree(tree_oid)
            .map_err(|e| GitError::from_git2(e, "write_tree"))?;

        // First commit in a fresh repository has no parent.
        let parent = match self.head_commit() {
            Ok(commit) => Some(commit),
            Err(GitError::UnbornHead) => None,
            Err(e) => return Err(e),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &author_sig,
                &committer_sig,
                message,
                &tree,
                &parents,
            )
            .map_err(|e| GitError::from_git2(e, "commit"))?;

        self.head_record()
    }

    /// Build a signature from an explicit identity or the repo config.
    fn signature_for(
        &self,
        identity: Option<&CommitIdentity>,
    ) -> Result<git2::Signature<'static>, GitError> {
        let (name, email) = match identity {
            Some(identity) => (identity.name.clone(), identity.email.clone()),
            None => (
                self.config_string("user.name")?,
                self.config_string("user.email")?,
            ),
        };

        git2::Signature::now(&name, &email).map_err(|e| GitError::from_git2(e, "signature"))
    }

    /// Read a required string from git config.
    fn config_string(&self, key: &str) -> Result<String, GitError> {
        self.repo
            .config()
            .map_err(|e| GitError::from_git2(e, "config"))?
            .get_string(key)
            .map_err(|_| GitError::MissingIdentity {
                key: key.to_string(),
            })
    }

    /// The identity that commits would default to, if fully configured.
    pub fn configured_identity(&self) -> Option<CommitIdentity> {
        let name = self.config_string("user.name").ok()?;
        let email = self.config_string("user.email").ok()?;
        Some(CommitIdentity { name, email })
    }

    /// Write `user.name` / `user.email` into the repository's local config.
    pub fn set_user(&self, name: &str, email: &str) -> Result<(), GitError> {
        let mut config = self
            .repo
            .config()
            .map_err(|e| GitError::from_git2(e, "config"))?;
        config
            .set_str("user.name", name)
            .map_err(|e| GitError::from_git2(e, "user.name"))?;
        config
            .set_str("user.email", email)
            .map_err(|e| GitError::from_git2(e, "user.email"))
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Get the fetch URL of a configured remote.
    ///
    /// # Errors
    ///
    /// - [`GitError::RemoteNotFound`] if the remote does not exist
    /// - [`GitError::RemoteWithoutUrl`] if it has no (utf8) URL
    pub fn remote_url(&self, name: &str) -> Result<String, GitError> {
        let remote = self.repo.find_remote(name).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => GitError::RemoteNotFound {
                name: name.to_string(),
            },
            _ => GitError::from_git2(e, name),
        })?;

        remote
            .url()
            .map(String::from)
            .ok_or_else(|| GitError::RemoteWithoutUrl {
                name: name.to_string(),
            })
    }

    /// Push a refspec to a remote, authenticating via `credentials`.
    ///
    /// `push_options` are delivered to the remote as `git push -o` strings
    /// (used for GitLab merge-request push options).
    pub fn push(
        &self,
        remote_name: &str,
        refspec: &str,
        credentials: &CredentialSource,
        push_options: &[String],
    ) -> Result<(), GitError> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => {
                    GitError::RemoteNotFound {
                        name: remote_name.to_string(),
                    }
                }
                _ => GitError::from_git2(e, remote_name),
            })?;

        let mut options = git2::PushOptions::new();
        options.remote_callbacks(remote_callbacks(credentials));
        if !push_options.is_empty() {
            let raw: Vec<&str> = push_options.iter().map(String::as_str).collect();
            options.remote_push_options(&raw);
        }

        remote
            .push(&[refspec], Some(&mut options))
            .map_err(|e| GitError::PushFailed {
                remote: remote_name.to_string(),
                message: e.message().to_string(),
            })
    }
}
