//
//  bitbucket-scaffolder
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Functions
//!
//! Small helpers shared by the actions and the CLI.
//!
//! ## Path Helpers
//!
//! - [`repo_source_directory`] - Resolve a source path inside a workspace
//!
//! ## String Manipulation
//!
//! - [`truncate`] - Truncate strings with ellipsis

use std::path::{Component, Path, PathBuf};

/// Resolves the directory to publish as the repository root.
///
/// `source_path` is interpreted relative to `workspace` and can never climb
/// out of it: leading `..` components are dropped, as is a root or prefix,
/// and a `..` deeper in the path only pops components it added itself.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use bitbucket_scaffolder::util::repo_source_directory;
///
/// let ws = Path::new("/tmp/ws");
/// assert_eq!(repo_source_directory(ws, None), Path::new("/tmp/ws"));
/// assert_eq!(repo_source_directory(ws, Some("app")), Path::new("/tmp/ws/app"));
/// assert_eq!(repo_source_directory(ws, Some("../../etc")), Path::new("/tmp/ws/etc"));
/// ```
pub fn repo_source_directory(workspace: &Path, source_path: Option<&str>) -> PathBuf {
    let Some(source_path) = source_path.filter(|p| !p.is_empty()) else {
        return workspace.to_path_buf();
    };

    let mut suffix: Vec<Component<'_>> = Vec::new();
    for component in Path::new(source_path).components() {
        match component {
            Component::Normal(_) => suffix.push(component),
            Component::ParentDir => {
                suffix.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    suffix
        .iter()
        .fold(workspace.to_path_buf(), |path, component| path.join(component))
}

/// Truncates a string to a maximum length, adding an ellipsis if truncated.
///
/// Counts characters, not bytes, so multi-byte text is never split.
///
/// # Examples
///
/// ```rust
/// use bitbucket_scaffolder::util::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
/// assert_eq!(truncate("Hello, World!", 8), "Hello...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_directory_defaults_to_workspace() {
        let ws = Path::new("/work");
        assert_eq!(repo_source_directory(ws, None), PathBuf::from("/work"));
        assert_eq!(repo_source_directory(ws, Some("")), PathBuf::from("/work"));
    }

    #[test]
    fn test_source_directory_nested() {
        let ws = Path::new("/work");
        assert_eq!(
            repo_source_directory(ws, Some("./service/./skeleton")),
            PathBuf::from("/work/service/skeleton")
        );
    }

    #[test]
    fn test_source_directory_cannot_escape() {
        let ws = Path::new("/work");
        assert_eq!(repo_source_directory(ws, Some("../secret")), PathBuf::from("/work/secret"));
        assert_eq!(repo_source_directory(ws, Some("/etc/passwd")), PathBuf::from("/work/etc/passwd"));
        assert_eq!(repo_source_directory(ws, Some("a/../../b")), PathBuf::from("/work/b"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
