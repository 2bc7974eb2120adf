//
//  bitbucket-scaffolder
//  cli/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bb-scaffold pipeline` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::json;

use super::{GlobalOptions, TOKEN_ENV};
use crate::actions::ActionContext;
use crate::output::{format_bool, print_field, TableOutput};

#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(subcommand)]
    pub command: PipelineSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineSubcommand {
    /// Enable Bitbucket Pipelines for a repository
    Enable(EnableArgs),
}

#[derive(Args, Debug)]
pub struct EnableArgs {
    /// Repository locator, e.g. 'bitbucket.org?workspace=w&project=p&repo=r'
    #[arg(long)]
    pub repo_url: String,

    /// User login token, used instead of the configured app password
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineEnabled {
    pipeline_enabled: bool,
}

impl TableOutput for PipelineEnabled {
    fn print_table(&self, color: bool) {
        print_field("Pipelines enabled", &format_bool(self.pipeline_enabled, color), color);
    }
}

impl PipelineCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PipelineSubcommand::Enable(args) => self.enable(args, global).await,
        }
    }

    async fn enable(&self, args: &EnableArgs, global: &GlobalOptions) -> Result<()> {
        let registry = global.action_registry()?;
        let mut ctx = ActionContext::new(
            json!({ "repoUrl": args.repo_url, "token": args.token }),
            ".",
        );
        registry.run("bitbucketCloud:pipeline:enable", &mut ctx).await?;

        let enabled = ctx
            .outputs()
            .get("pipelineEnabled")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        global.output().write(&PipelineEnabled {
            pipeline_enabled: enabled,
        })
    }
}
