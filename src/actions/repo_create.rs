//
//  bitbucket-scaffolder
//  actions/repo_create.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bitbucketCloud:repo:create`: create a repository and publish the
//! workspace content to it.
//!
//! ## Steps
//!
//! 1. Resolve the repository locator to an integration and credential
//! 2. `POST /repositories/{workspace}/{repo}`
//! 3. Take the `https` clone link and `{html}/src/{defaultBranch}` from the reply
//! 4. Init, commit and push the source directory
//! 5. Output `remoteUrl` and `repoContentsUrl`

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{ActionContext, ActionSchema, TemplateAction};
use crate::api::cloud::CreateRepositoryOptions;
use crate::api::BitbucketCloudClient;
use crate::config::{IntegrationRegistry, ScaffolderConfig};
use crate::context::{resolve_target, PushRequest, RepoPusher};
use crate::util::repo_source_directory;

/// Branch created when the input names none.
pub const DEFAULT_BRANCH: &str = "master";

/// Visibility of a new repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepoVisibility {
    #[default]
    Private,
    Public,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCreateInput {
    pub repo_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub repo_visibility: RepoVisibility,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

pub struct BitbucketCloudRepoCreateAction {
    integrations: Arc<dyn IntegrationRegistry>,
    config: ScaffolderConfig,
    pusher: Arc<dyn RepoPusher>,
}

impl BitbucketCloudRepoCreateAction {
    pub fn new(
        integrations: Arc<dyn IntegrationRegistry>,
        config: ScaffolderConfig,
        pusher: Arc<dyn RepoPusher>,
    ) -> Self {
        Self {
            integrations,
            config,
            pusher,
        }
    }
}

#[async_trait]
impl TemplateAction for BitbucketCloudRepoCreateAction {
    fn id(&self) -> &'static str {
        "bitbucketCloud:repo:create"
    }

    fn description(&self) -> &'static str {
        "Initializes a git repository of the content in the workspace, and publishes it to Bitbucket Cloud."
    }

    fn schema(&self) -> ActionSchema {
        ActionSchema {
            input: json!({
                "type": "object",
                "required": ["repoUrl"],
                "properties": {
                    "repoUrl": {
                        "title": "Repository Location",
                        "type": "string",
                    },
                    "description": {
                        "title": "Repository Description",
                        "type": "string",
                    },
                    "repoVisibility": {
                        "title": "Repository Visibility",
                        "type": "string",
                        "enum": ["private", "public"],
                    },
                    "defaultBranch": {
                        "title": "Default Branch",
                        "type": "string",
                        "description": "Sets the default branch on the repository. The default value is 'master'",
                    },
                    "sourcePath": {
                        "title": "Source Path",
                        "type": "string",
                        "description": "Path within the workspace that will be used as the repository root. If omitted, the entire workspace will be published as the repository.",
                    },
                    "token": {
                        "title": "Authentication Token",
                        "type": "string",
                        "description": "The token to use for authorization to BitBucket Cloud",
                    },
                },
            }),
            output: json!({
                "type": "object",
                "properties": {
                    "remoteUrl": {
                        "title": "A URL to the repository with the provider",
                        "type": "string",
                    },
                    "repoContentsUrl": {
                        "title": "A URL to the root of the repository",
                        "type": "string",
                    },
                },
            }),
        }
    }

    async fn handler(&self, ctx: &mut ActionContext) -> Result<()> {
        let input: RepoCreateInput = ctx.input()?;
        let token = input.token.as_deref().filter(|t| !t.is_empty());
        let target = resolve_target(&input.repo_url, self.integrations.as_ref(), token)?;

        let client = BitbucketCloudClient::new(&target.api_base_url)?.with_auth(target.authorization.clone());
        let repository = client
            .create_repository(&CreateRepositoryOptions {
                workspace: target.workspace.clone(),
                project: target.project.clone(),
                repo: target.repo.clone(),
                description: input.description.clone(),
                is_private: input.repo_visibility == RepoVisibility::Private,
            })
            .await?;
        info!(repo = %target.full_name(), "Created repository");

        let remote_url = repository
            .https_clone_url()
            .ok_or_else(|| anyhow!("Repository {} has no https clone link", target.full_name()))?
            .to_string();
        let repo_contents_url = repository
            .contents_url(&input.default_branch)
            .ok_or_else(|| anyhow!("Repository {} has no html link", target.full_name()))?;

        self.pusher
            .push(PushRequest {
                dir: repo_source_directory(&ctx.workspace_path, input.source_path.as_deref()),
                remote_url: remote_url.clone(),
                auth: target.authorization.git_auth(),
                default_branch: input.default_branch.clone(),
                commit_message: self.config.default_commit_message.clone(),
                author: self.config.default_author.clone(),
            })
            .await?;

        ctx.output("remoteUrl", remote_url);
        ctx.output("repoContentsUrl", repo_contents_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults() {
        let input: RepoCreateInput =
            serde_json::from_value(json!({ "repoUrl": "bitbucket.org?workspace=w&project=p&repo=r" }))
                .unwrap();
        assert_eq!(input.default_branch, "master");
        assert_eq!(input.repo_visibility, RepoVisibility::Private);
        assert!(input.source_path.is_none());
    }

    #[test]
    fn test_input_public_visibility() {
        let input: RepoCreateInput = serde_json::from_value(json!({
            "repoUrl": "bitbucket.org?workspace=w&project=p&repo=r",
            "repoVisibility": "public",
            "defaultBranch": "main",
        }))
        .unwrap();
        assert_eq!(input.repo_visibility, RepoVisibility::Public);
        assert_eq!(input.default_branch, "main");
    }

    #[test]
    fn test_input_rejects_unknown_visibility() {
        let result = serde_json::from_value::<RepoCreateInput>(json!({
            "repoUrl": "bitbucket.org?workspace=w&project=p&repo=r",
            "repoVisibility": "internal",
        }));
        assert!(result.is_err());
    }
}
