//
//  bitbucket-scaffolder
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Target Context Module
//!
//! Turns the portal's provider-neutral repository locator into everything an
//! action needs to talk to Bitbucket Cloud, and pushes initial content to a
//! freshly created repository.
//!
//! ## Overview
//!
//! - [`parse_repo_url`]: splits `bitbucket.org?workspace=w&project=p&repo=r`
//!   into a [`RepoLocation`]
//! - [`resolve_target`]: validates the location, looks up the integration for
//!   its host and picks the credential, producing a [`BitbucketTarget`]
//! - [`RepoPusher`] / [`Git2Pusher`]: init, commit and push a directory
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_scaffolder::config::{BitbucketCloudIntegration, ScmIntegrations};
//! use bitbucket_scaffolder::context::resolve_target;
//!
//! let integrations = ScmIntegrations::new(vec![BitbucketCloudIntegration {
//!     username: Some("u".into()),
//!     app_password: Some("p".into()),
//!     ..Default::default()
//! }]);
//!
//! let target = resolve_target(
//!     "bitbucket.org?workspace=w&project=p&repo=r",
//!     &integrations,
//!     None,
//! )?;
//! assert_eq!(target.full_name(), "w/r");
//! assert_eq!(target.authorization.header_value(), "Basic dTpw");
//! # Ok::<(), bitbucket_scaffolder::context::ResolveError>(())
//! ```

mod git;
mod resolver;

pub use git::*;
pub use resolver::*;

use thiserror::Error;

use crate::auth::AuthCredential;
use crate::config::BitbucketCloudIntegration;

/// A repository locator split into its parts.
///
/// Every query parameter is optional at this stage; [`resolve_target`]
/// decides which ones are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// Host the locator points at (e.g., "bitbucket.org")
    pub host: String,
    /// Workspace slug
    pub workspace: Option<String>,
    /// Project key
    pub project: Option<String>,
    /// Repository slug
    pub repo: Option<String>,
}

/// Everything needed to call Bitbucket Cloud for one repository.
///
/// # Fields
///
/// * `api_base_url` - REST base URL taken from the matched integration
/// * `authorization` - Credential to attach to every request
/// * `integration` - The matched integration, used again for git credentials
/// * `workspace` / `project` / `repo` - The validated locator parts
#[derive(Debug, Clone)]
pub struct BitbucketTarget {
    pub api_base_url: String,
    pub authorization: AuthCredential,
    pub integration: BitbucketCloudIntegration,
    pub workspace: String,
    pub project: String,
    pub repo: String,
}

impl BitbucketTarget {
    /// Returns the repository path in the format "workspace/repo".
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.workspace, self.repo)
    }
}

/// Errors raised while resolving a repository locator.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The locator is malformed or lacks a required part.
    #[error("{0}")]
    InvalidInput(String),

    /// No integration is registered for the locator's host.
    #[error("No matching integration configuration for host {0}, please check your integrations config")]
    NoMatchingIntegration(String),

    /// Neither a token nor stored credentials are available.
    #[error("Authorization has not been provided for Bitbucket Cloud. Please add either username + appPassword to the Integrations config or a user login auth token")]
    MissingAuthorization,
}
