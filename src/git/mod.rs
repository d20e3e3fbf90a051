//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads and
//! writes flow through this interface; no other module imports `git2`.
//! The `git2` crate is used exclusively (no shelling out to the git CLI).
//!
//! # Responsibilities
//!
//! - Repository discovery, opening, and cloning
//! - Index staging and commit creation
//! - Branch creation and checkout
//! - Remote lookup and push (with credential callbacks)
//! - Reading and writing the repository's identity config
//! - Normalizing the head commit into a [`CommitRecord`]

mod interface;

pub use interface::{
    CheckoutMode, CommitIdentity, CommitRecord, CurrentBranch, Git, GitError,
};
