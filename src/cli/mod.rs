//
//  bitbucket-scaffolder
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command Line Interface
//!
//! `bb-scaffold` drives the scaffolder actions from a terminal or a CI job,
//! and exposes the paginated listings the actions are built on.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `repo create` | Run `bitbucketCloud:repo:create` |
//! | `repo list` | List repositories in a workspace |
//! | `pipeline enable` | Run `bitbucketCloud:pipeline:enable` |
//! | `search code` | Search code in a workspace |
//! | `action list` / `action schema` | Inspect the built-in actions |
//! | `version` | Print the version |
//!
//! ## Global Options
//!
//! - `--config <PATH>` (`BB_SCAFFOLD_CONFIG`): config file to load
//! - `--json`: print results as JSON

mod action;
mod pipeline;
mod repo;
mod search;

pub use action::ActionCommand;
pub use pipeline::PipelineCommand;
pub use repo::RepoCommand;
pub use search::SearchCommand;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::actions::ActionRegistry;
use crate::api::BitbucketCloudClient;
use crate::auth::AuthCredential;
use crate::config::{Config, IntegrationRegistry, ScmIntegrations};
use crate::context::{Git2Pusher, ResolveError};
use crate::output::{OutputFormat, OutputWriter};

/// Environment variable holding a user login token.
pub const TOKEN_ENV: &str = "BITBUCKET_TOKEN";

#[derive(Parser, Debug)]
#[command(
    name = "bb-scaffold",
    version,
    about = "Create and configure Bitbucket Cloud repositories from templates",
    propagate_version = true,
    after_help = "Use 'bb-scaffold <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file to load instead of the default location
    #[arg(long, global = true, env = "BB_SCAFFOLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// Registry of built-in actions wired to the loaded config.
    pub fn action_registry(&self) -> Result<ActionRegistry> {
        let config = self.load_config()?;
        Ok(ActionRegistry::builtin(
            Arc::new(ScmIntegrations::from_config(&config)),
            config.scaffolder,
            Arc::new(Git2Pusher),
        ))
    }

    /// Client for the integration registered for `host`.
    ///
    /// A non-empty `token` replaces the integration's app password.
    pub fn client_for_host(&self, host: &str, token: Option<&str>) -> Result<BitbucketCloudClient> {
        let config = self.load_config()?;
        let integrations = ScmIntegrations::from_config(&config);
        let integration = integrations
            .by_host(host)
            .ok_or_else(|| ResolveError::NoMatchingIntegration(host.to_string()))?;

        let client = BitbucketCloudClient::from_config(integration)?;
        Ok(match token.filter(|t| !t.is_empty()) {
            Some(token) => client.with_auth(AuthCredential::bearer(token)),
            None => client,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and list repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Configure Bitbucket Pipelines
    Pipeline(PipelineCommand),

    /// Search a workspace
    Search(SearchCommand),

    /// Inspect the built-in scaffolder actions
    Action(ActionCommand),

    /// Print the version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pipeline_enable() {
        let cli = Cli::try_parse_from([
            "bb-scaffold",
            "--json",
            "pipeline",
            "enable",
            "--repo-url",
            "bitbucket.org?workspace=w&project=p&repo=r",
        ])
        .unwrap();
        assert!(cli.global.json);
        assert!(matches!(cli.command, Commands::Pipeline(_)));
    }
}
