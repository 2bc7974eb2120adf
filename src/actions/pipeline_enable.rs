//
//  bitbucket-scaffolder
//  actions/pipeline_enable.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bitbucketCloud:pipeline:enable`: turn on Pipelines for a repository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{ActionContext, ActionSchema, TemplateAction};
use crate::api::BitbucketCloudClient;
use crate::config::IntegrationRegistry;
use crate::context::resolve_target;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnablePipelineInput {
    pub repo_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

pub struct BitbucketCloudEnablePipelineAction {
    integrations: Arc<dyn IntegrationRegistry>,
}

impl BitbucketCloudEnablePipelineAction {
    pub fn new(integrations: Arc<dyn IntegrationRegistry>) -> Self {
        Self { integrations }
    }
}

#[async_trait]
impl TemplateAction for BitbucketCloudEnablePipelineAction {
    fn id(&self) -> &'static str {
        "bitbucketCloud:pipeline:enable"
    }

    fn description(&self) -> &'static str {
        "Enables Bitbucket Pipelines for a Bitbucket Cloud repository."
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
                    "pipelineEnabled": {
                        "title": "Whether pipelines are enabled on the repository",
                        "type": "boolean",
                    },
                },
            }),
        }
    }

    async fn handler(&self, ctx: &mut ActionContext) -> Result<()> {
        let input: EnablePipelineInput = ctx.input()?;
        let target = resolve_target(&input.repo_url, self.integrations.as_ref(), input.token.as_deref())?;

        let client = BitbucketCloudClient::new(&target.api_base_url)?.with_auth(target.authorization.clone());
        let config = client
            .enable_repository_pipeline(&target.workspace, &target.repo)
            .await?;

        info!(repo = %target.full_name(), enabled = config.enabled, "Updated pipelines config");
        ctx.output("pipelineEnabled", config.enabled);
        Ok(())
    }
}
