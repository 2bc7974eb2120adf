//
//  bitbucket-scaffolder
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bb-scaffold repo` commands.
//!
//! - `repo create`: creates a repository and pushes a directory to it
//! - `repo list`: lists the repositories of a workspace, following pages

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::json;

use super::{GlobalOptions, TOKEN_ENV};
use crate::actions::{ActionContext, RepoVisibility, DEFAULT_BRANCH};
use crate::api::cloud::Repository;
use crate::api::common::{FilterAndSortOptions, ListOptions, PaginationOptions, PartialResponseOptions, DEFAULT_PAGELEN};
use crate::config::BITBUCKET_CLOUD;
use crate::output::{print_field, TableOutput};
use crate::util::truncate;

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// Create a repository and publish a directory to it
    Create(CreateArgs),

    /// List repositories in a workspace
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository locator, e.g. 'bitbucket.org?workspace=w&project=p&repo=r'
    #[arg(long)]
    pub repo_url: String,

    /// Repository description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Branch to create and push
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub default_branch: String,

    /// Repository visibility
    #[arg(long, value_enum, default_value_t = RepoVisibility::Private)]
    pub visibility: RepoVisibility,

    /// Directory holding the content to publish
    #[arg(long, default_value = ".")]
    pub workspace_path: PathBuf,

    /// Path inside the workspace to use as the repository root
    #[arg(long)]
    pub source_path: Option<String>,

    /// User login token, used instead of the configured app password
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Workspace slug
    #[arg(long, short = 'w')]
    pub workspace: String,

    /// Integration host
    #[arg(long, default_value = BITBUCKET_CLOUD)]
    pub host: String,

    /// Filter query, e.g. 'name ~ "api"'
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Sort field, e.g. '-updated_on'
    #[arg(long)]
    pub sort: Option<String>,

    /// Partial response field selector
    #[arg(long)]
    pub fields: Option<String>,

    /// Maximum number of repositories to show
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,

    /// User login token, used instead of the configured app password
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedRepo {
    remote_url: String,
    repo_contents_url: String,
}

impl TableOutput for CreatedRepo {
    fn print_table(&self, color: bool) {
        print_field("Remote URL", &self.remote_url, color);
        print_field("Contents URL", &self.repo_contents_url, color);
    }
}

/// Display format for repository list
#[derive(Debug, Serialize)]
struct RepoListItem {
    full_name: String,
    description: Option<String>,
    is_private: bool,
    project: Option<String>,
    updated_on: Option<String>,
}

impl From<Repository> for RepoListItem {
    fn from(repo: Repository) -> Self {
        let full_name = repo
            .full_name
            .or(repo.slug)
            .or(repo.name)
            .unwrap_or_default();
        Self {
            full_name,
            description: repo.description.filter(|d| !d.is_empty()),
            is_private: repo.is_private,
            project: repo.project.map(|p| p.key),
            updated_on: repo.updated_on,
        }
    }
}

impl TableOutput for RepoListItem {
    fn print_table(&self, color: bool) {
        let visibility = if self.is_private { "private" } else { "public" };
        let visibility_styled = if color {
            if self.is_private {
                style(visibility).yellow().to_string()
            } else {
                style(visibility).green().to_string()
            }
        } else {
            visibility.to_string()
        };

        let project = self.project.as_deref().unwrap_or("-");
        let desc = truncate(self.description.as_deref().unwrap_or(""), 50);

        println!("{:<40} {:<10} {:<12} {}", self.full_name, visibility_styled, project, desc);
    }
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::Create(args) => self.create(args, global).await,
            RepoSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let registry = global.action_registry()?;
        let mut ctx = ActionContext::new(
            json!({
                "repoUrl": args.repo_url,
                "description": args.description,
                "defaultBranch": args.default_branch,
                "repoVisibility": args.visibility,
                "sourcePath": args.source_path,
                "token": args.token,
            }),
            &args.workspace_path,
        );
        registry.run("bitbucketCloud:repo:create", &mut ctx).await?;

        let output_string = |name: &str| {
            ctx.outputs()
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let created = CreatedRepo {
            remote_url: output_string("remoteUrl"),
            repo_contents_url: output_string("repoContentsUrl"),
        };

        let output = global.output();
        output.write_success("Repository created and initial content pushed");
        output.write(&created)
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client_for_host(&args.host, args.token.as_deref())?;

        let options = ListOptions {
            filter: FilterAndSortOptions {
                q: args.query.clone(),
                sort: args.sort.clone(),
            },
            partial: PartialResponseOptions {
                fields: args.fields.clone(),
            },
        };
        let pagination = PaginationOptions {
            page: None,
            pagelen: Some(args.limit.clamp(1, DEFAULT_PAGELEN as usize) as u32),
        };

        let repos: Vec<RepoListItem> = client
            .list_repositories_by_workspace(&args.workspace, &options)
            .iterate_results(&pagination)
            .take(args.limit)
            .map_ok(RepoListItem::from)
            .try_collect()
            .await?;

        let output = global.output();
        if repos.is_empty() {
            output.write_warning(&format!("No repositories found in {}", args.workspace));
        }
        output.write_list(&repos)
    }
}
