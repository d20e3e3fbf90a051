//! core::paths
//!
//! Workspace-confined path resolution.
//!
//! # Design
//!
//! Every action operates on files below a sandboxed workspace root. All
//! working-directory inputs are routed through [`resolve_safe_child_path`]
//! so a template can never address a path outside its workspace.
//!
//! **Hard rule:** no action may join user-supplied path segments onto the
//! workspace directly. All resolution goes through this module.
//!
//! # Containment
//!
//! Resolution is purely lexical: `.` segments are dropped and `..` segments
//! pop previously accepted components. A `..` that would climb above the
//! workspace root, or an absolute input path, is rejected. Symlinks are not
//! chased here; the workspace is assumed to be link-free, which is the
//! contract the surrounding scaffolding runner provides.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors from workspace path resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The resolved path would fall outside the workspace root.
    #[error("path '{path}' escapes the workspace")]
    OutsideWorkspace {
        /// The offending input path
        path: String,
    },

    /// Absolute paths are not accepted as workspace-relative inputs.
    #[error("absolute path '{path}' is not allowed in the workspace")]
    AbsolutePath {
        /// The offending input path
        path: String,
    },
}

/// Resolve a child path safely below a workspace root.
///
/// # Errors
///
/// - [`PathError::AbsolutePath`] if `child` is absolute
/// - [`PathError::OutsideWorkspace`] if `child` traverses above the root
///
/// # Example
///
/// ```
/// use scaffgit::core::paths::resolve_safe_child_path;
/// use std::path::Path;
///
/// let root = Path::new("/workspace");
/// let resolved = resolve_safe_child_path(root, "sub/dir").unwrap();
/// assert_eq!(resolved, Path::new("/workspace/sub/dir"));
///
/// assert!(resolve_safe_child_path(root, "../elsewhere").is_err());
/// assert!(resolve_safe_child_path(root, "/etc/passwd").is_err());
/// ```
pub fn resolve_safe_child_path(root: &Path, child: impl AsRef<Path>) -> Result<PathBuf, PathError> {
    let child = child.as_ref();

    if child.is_absolute() {
        return Err(PathError::AbsolutePath {
            path: child.display().to_string(),
        });
    }

    let mut accepted: Vec<&std::ffi::OsStr> = Vec::new();
    for component in child.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => accepted.push(part),
            Component::ParentDir => {
                if accepted.pop().is_none() {
                    return Err(PathError::OutsideWorkspace {
                        path: child.display().to_string(),
                    });
                }
            }
            // Prefix/RootDir only occur in absolute paths, rejected above
            Component::Prefix(_) | Component::RootDir => {
                return Err(PathError::AbsolutePath {
                    path: child.display().to_string(),
                });
            }
        }
    }

    let mut resolved = root.to_path_buf();
    for part in accepted {
        resolved.push(part);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_child() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_safe_child_path(root, "a/b").unwrap(),
            PathBuf::from("/ws/a/b")
        );
    }

    #[test]
    fn dot_and_dot_slash_resolve_to_root() {
        let root = Path::new("/ws");
        assert_eq!(resolve_safe_child_path(root, ".").unwrap(), PathBuf::from("/ws"));
        assert_eq!(resolve_safe_child_path(root, "./").unwrap(), PathBuf::from("/ws"));
    }

    #[test]
    fn internal_parent_segments_are_allowed() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_safe_child_path(root, "a/../b").unwrap(),
            PathBuf::from("/ws/b")
        );
    }

    #[test]
    fn escaping_parent_is_rejected() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_safe_child_path(root, ".."),
            Err(PathError::OutsideWorkspace { path: "..".into() })
        );
        assert!(resolve_safe_child_path(root, "a/../../b").is_err());
    }

    #[test]
    fn absolute_path_is_rejected() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_safe_child_path(root, "/etc"),
            Err(PathError::AbsolutePath { path: "/etc".into() })
        );
    }
}
