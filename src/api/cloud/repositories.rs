//
//  bitbucket-scaffolder
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API types and data structures.
//!
//! Repositories belong to a workspace and, for creation through the
//! scaffolder, always to a project inside that workspace.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_scaffolder::api::cloud::repositories::CreateRepositoryRequest;
//!
//! let request = CreateRepositoryRequest::new(
//!     Some("Main backend microservice".to_string()),
//!     true,
//!     "BACKEND",
//! );
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["scm"], "git");
//! assert_eq!(body["project"]["key"], "BACKEND");
//! ```
//!
//! # Notes
//!
//! - The `full_name` field follows the format `{workspace}/{repo_slug}`
//! - `mainbranch` cannot be set on create; the first pushed branch becomes it

use serde::{Deserialize, Serialize};

use crate::api::common::Link;

/// Represents a Bitbucket Cloud repository.
///
/// Only the fields needed by the scaffolder and the list command are
/// modelled, and all of them are optional so that partial responses
/// (`fields=` selectors, minimal mock payloads) still decode.
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::api::cloud::repositories::Repository;
///
/// let repo: Repository = serde_json::from_str(r#"{
///     "links": {
///         "html": {"href": "https://bitbucket.org/workspace/repo"},
///         "clone": [
///             {"name": "https", "href": "https://bitbucket.org/workspace/repo.git"},
///             {"name": "ssh", "href": "git@bitbucket.org:workspace/repo.git"}
///         ]
///     }
/// }"#).unwrap();
///
/// assert_eq!(repo.https_clone_url(), Some("https://bitbucket.org/workspace/repo.git"));
/// assert_eq!(
///     repo.contents_url("main").as_deref(),
///     Some("https://bitbucket.org/workspace/repo/src/main"),
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    /// Unique identifier for the repository (e.g., `{123e4567-e89b-...}`).
    #[serde(default)]
    pub uuid: Option<String>,

    /// Human-readable name of the repository.
    #[serde(default)]
    pub name: Option<String>,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    #[serde(default)]
    pub full_name: Option<String>,

    /// URL-safe identifier derived from the repository name.
    #[serde(default)]
    pub slug: Option<String>,

    /// Optional description of the repository's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// Reference to the main/default branch of the repository.
    #[serde(default)]
    pub mainbranch: Option<Branch>,

    /// Project within the workspace that organizes this repository.
    #[serde(default)]
    pub project: Option<ProjectRef>,

    /// ISO 8601 timestamp of the last update.
    #[serde(default)]
    pub updated_on: Option<String>,

    /// Web and clone links.
    #[serde(default)]
    pub links: RepositoryLinks,
}

impl Repository {
    /// Returns the HTTPS clone URL, if Bitbucket returned one.
    pub fn https_clone_url(&self) -> Option<&str> {
        self.links
            .clone
            .iter()
            .find(|link| link.name.as_deref() == Some("https"))
            .map(|link| link.href.as_str())
    }

    /// Returns the web URL of the repository root on `branch`.
    pub fn contents_url(&self, branch: &str) -> Option<String> {
        self.links
            .html
            .as_ref()
            .map(|html| format!("{}/src/{}", html.href, branch))
    }
}

/// Links embedded in a repository payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryLinks {
    /// Web page of the repository.
    #[serde(default)]
    pub html: Option<Link>,

    /// Clone URLs, one per protocol (`https`, `ssh`).
    #[serde(default)]
    pub clone: Vec<Link>,
}

/// Represents a branch within a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// The name of the branch.
    pub name: String,

    /// Optional type classification for the branch.
    #[serde(rename = "type", default)]
    pub branch_type: Option<String>,
}

/// A lightweight reference to a project within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Short alphanumeric key for the project (typically uppercase).
    pub key: String,

    /// Human-readable name of the project.
    #[serde(default)]
    pub name: Option<String>,
}

/// Request payload for creating a new repository.
///
/// Sent as `POST /repositories/{workspace}/{repo_slug}`. The slug comes from
/// the URL, so the body carries no name.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryRequest {
    /// Always `git`.
    pub scm: String,

    /// Optional description of the repository's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the repository should be private.
    pub is_private: bool,

    /// Project to organize the repository under.
    pub project: ProjectKey,
}

impl CreateRepositoryRequest {
    pub fn new(description: Option<String>, is_private: bool, project: impl Into<String>) -> Self {
        Self {
            scm: "git".to_string(),
            description,
            is_private,
            project: ProjectKey {
                key: project.into(),
            },
        }
    }
}

/// Project key for assigning a repository to a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectKey {
    /// The short alphanumeric key identifying the project.
    pub key: String,
}

/// Everything needed to create a repository through the client.
#[derive(Debug, Clone)]
pub struct CreateRepositoryOptions {
    pub workspace: String,
    pub project: String,
    pub repo: String,
    pub description: Option<String>,
    pub is_private: bool,
}
