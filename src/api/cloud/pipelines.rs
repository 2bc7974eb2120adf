//
//  bitbucket-scaffolder
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pipelines configuration types.
//!
//! Bitbucket Pipelines is toggled per repository through
//! `PUT /repositories/{workspace}/{repo_slug}/pipelines_config`.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_scaffolder::api::cloud::pipelines::UpdatePipelinesConfig;
//!
//! let body = serde_json::to_value(UpdatePipelinesConfig::enable("my-repo")).unwrap();
//! assert_eq!(body["enabled"], true);
//! assert_eq!(body["repository"]["slug"], "my-repo");
//! ```

use serde::{Deserialize, Serialize};

/// Request body for updating the pipelines configuration.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePipelinesConfig {
    /// Whether pipelines should run for the repository.
    pub enabled: bool,

    /// Repository reference.
    pub repository: PipelinesRepositoryRef,
}

impl UpdatePipelinesConfig {
    /// Body that turns pipelines on for `repo_slug`.
    pub fn enable(repo_slug: &str) -> Self {
        Self {
            enabled: true,
            repository: PipelinesRepositoryRef {
                ref_type: "repository_pipelines_configuration".to_string(),
                slug: repo_slug.to_string(),
            },
        }
    }
}

/// Repository reference inside a pipelines configuration request.
#[derive(Debug, Clone, Serialize)]
pub struct PipelinesRepositoryRef {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub slug: String,
}

/// Pipelines configuration as returned by Bitbucket.
///
/// `enabled` defaults to `false` when the response omits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelinesConfig {
    /// Whether pipelines are enabled for the repository.
    #[serde(default)]
    pub enabled: bool,

    /// Repository the configuration belongs to, passed through as-is.
    #[serde(default)]
    pub repository: Option<serde_json::Value>,
}
