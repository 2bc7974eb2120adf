//
//  bitbucket-scaffolder
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Scaffolder Library
//!
//! Scaffolder actions and a REST client that let a developer portal create
//! and configure repositories on Bitbucket Cloud.
//!
//! ## Overview
//!
//! A template run typically renders some files into a workspace directory
//! and then calls:
//!
//! 1. `bitbucketCloud:repo:create`: create the repository, push the
//!    workspace content as the first commit
//! 2. `bitbucketCloud:pipeline:enable`: turn on Bitbucket Pipelines
//!
//! Each action resolves a provider-neutral locator such as
//! `bitbucket.org?workspace=w&project=p&repo=r` against the configured
//! integrations, picks a credential and talks to the REST API.
//!
//! ## Module Structure
//!
//! - [`actions`]: Template actions and their registry
//! - [`api`]: Bitbucket Cloud REST client, models, pagination
//! - [`auth`]: Basic / Bearer credentials
//! - [`config`]: Configuration file and integration registry
//! - [`context`]: Locator resolution and the initial git push
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bitbucket_scaffolder::actions::{ActionContext, ActionRegistry};
//! use bitbucket_scaffolder::config::ScmIntegrations;
//! use bitbucket_scaffolder::context::Git2Pusher;
//! use bitbucket_scaffolder::Config;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None)?;
//! let registry = ActionRegistry::builtin(
//!     Arc::new(ScmIntegrations::from_config(&config)),
//!     config.scaffolder.clone(),
//!     Arc::new(Git2Pusher),
//! );
//!
//! let mut ctx = ActionContext::new(
//!     json!({
//!         "repoUrl": "bitbucket.org?workspace=w&project=p&repo=r",
//!         "defaultBranch": "main",
//!     }),
//!     "./rendered",
//! );
//! registry.run("bitbucketCloud:repo:create", &mut ctx).await?;
//! println!("{}", ctx.outputs()["remoteUrl"]);
//! # Ok(())
//! # }
//! ```

/// Template actions: the `TemplateAction` trait, its context and the
/// built-in Bitbucket Cloud actions.
pub mod actions;

/// Bitbucket Cloud REST API client.
///
/// Handles URL building, authentication, request execution, pagination
/// and error mapping.
pub mod api;

/// Credentials for REST calls and git pushes.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration file management and the integration registry.
pub mod config;

/// Repository locator resolution and initial content push.
pub mod context;

/// Output formatting for command results.
pub mod output;

/// Utility functions.
pub mod util;

pub use cli::Cli;

pub use config::Config;

pub use context::BitbucketTarget;

/// Application name, used for the config directory and User-Agent.
pub const APP_NAME: &str = "bb-scaffold";

/// Application version.
///
/// The current version, automatically derived from Cargo.toml at compile
/// time using the `CARGO_PKG_VERSION` environment variable.
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::VERSION;
///
/// println!("bb-scaffold version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_scaffolder::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid input, e.g. a malformed repository locator.
    pub const USAGE: i32 = 2;

    /// No usable credential, or Bitbucket rejected it.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// Picks the exit code for an error returned by a command.
    ///
    /// ```rust
    /// use bitbucket_scaffolder::context::ResolveError;
    /// use bitbucket_scaffolder::exit_codes;
    ///
    /// let err = anyhow::Error::from(ResolveError::MissingAuthorization);
    /// assert_eq!(exit_codes::for_error(&err), exit_codes::AUTH_ERROR);
    /// ```
    pub fn for_error(err: &anyhow::Error) -> i32 {
        use crate::api::ApiError;
        use crate::context::ResolveError;
        use reqwest::StatusCode;

        if let Some(err) = err.downcast_ref::<ResolveError>() {
            return match err {
                ResolveError::MissingAuthorization => AUTH_ERROR,
                ResolveError::InvalidInput(_) | ResolveError::NoMatchingIntegration(_) => USAGE,
            };
        }

        match err.downcast_ref::<ApiError>().and_then(ApiError::status) {
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => AUTH_ERROR,
            Some(StatusCode::NOT_FOUND) => NOT_FOUND,
            _ => ERROR,
        }
    }
}
