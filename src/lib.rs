//! scaffgit - Template git actions for a scaffolding workspace
//!
//! scaffgit is a single-binary tool exposing the git operations a
//! software-catalog scaffolding workflow needs: clone, add, commit,
//! checkout, push, and arbitrary command execution, each confined to a
//! sandboxed workspace, plus small clients that fetch the authenticated
//! user's identity from GitHub and GitLab.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to actions)
//! - [`actions`] - One adapter per template action: validate input, orchestrate,
//!   emit typed output
//! - [`scm`] - Integration registry, credential selection, and provider
//!   user-info clients
//! - [`git`] - Single interface for all Git operations
//! - [`core`] - Configuration and workspace path containment
//! - [`ui`] - Output utilities
//!
//! # Invariants
//!
//! 1. The integration registry is built once from configuration and passed
//!    explicitly; there is no ambient global lookup
//! 2. All Git operations flow through the [`git`] doorway; no other module
//!    imports `git2`
//! 3. Working directories always resolve through the workspace containment
//!    check; an action can never touch paths outside its workspace

pub mod actions;
pub mod cli;
pub mod core;
pub mod git;
pub mod scm;
pub mod ui;
