//
//  bitbucket-scaffolder
//  cli/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bb-scaffold search` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use super::{GlobalOptions, TOKEN_ENV};
use crate::api::cloud::SearchCodeSearchResult;
use crate::api::common::{ListOptions, PaginationOptions, DEFAULT_PAGELEN};
use crate::config::BITBUCKET_CLOUD;
use crate::output::TableOutput;

#[derive(Args, Debug)]
pub struct SearchCommand {
    #[command(subcommand)]
    pub command: SearchSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SearchSubcommand {
    /// Search code across a workspace
    Code(CodeArgs),
}

#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Search query, e.g. 'bitbucket-pipelines.yml' or 'ext:rs tokio'
    pub query: String,

    /// Workspace slug
    #[arg(long, short = 'w')]
    pub workspace: String,

    /// Integration host
    #[arg(long, default_value = BITBUCKET_CLOUD)]
    pub host: String,

    /// Maximum number of results to show
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,

    /// User login token, used instead of the configured app password
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CodeMatch {
    path: String,
    matches: u32,
}

impl From<SearchCodeSearchResult> for CodeMatch {
    fn from(result: SearchCodeSearchResult) -> Self {
        Self {
            path: result.path().to_string(),
            matches: result.content_match_count,
        }
    }
}

impl TableOutput for CodeMatch {
    fn print_table(&self, _color: bool) {
        println!("{:<60} {}", self.path, self.matches);
    }
}

impl SearchCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SearchSubcommand::Code(args) => self.code(args, global).await,
        }
    }

    async fn code(&self, args: &CodeArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client_for_host(&args.host, args.token.as_deref())?;
        let pagination = PaginationOptions {
            page: None,
            pagelen: Some(args.limit.clamp(1, DEFAULT_PAGELEN as usize) as u32),
        };

        let matches: Vec<CodeMatch> = client
            .search_code(&args.workspace, &args.query, &ListOptions::default())
            .iterate_results(&pagination)
            .take(args.limit)
            .map_ok(CodeMatch::from)
            .try_collect()
            .await?;

        let output = global.output();
        if matches.is_empty() {
            output.write_warning(&format!("No code matching '{}' in {}", args.query, args.workspace));
        }
        output.write_list(&matches)
    }
}
