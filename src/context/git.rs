//
//  bitbucket-scaffolder
//  context/git.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Initial Content Push
//!
//! Publishes a local directory as the first commit of a remote repository,
//! using the `git2` library.
//!
//! ## Overview
//!
//! [`Git2Pusher`] performs, in order:
//! - `git init` with the default branch as the initial HEAD
//! - stage every file in the directory
//! - commit with the configured author and message
//! - add `origin` and push `refs/heads/{branch}`
//!
//! libgit2 is blocking, so the work runs on a blocking task that the caller
//! awaits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_scaffolder::auth::GitAuth;
//! use bitbucket_scaffolder::config::GitAuthorInfo;
//! use bitbucket_scaffolder::context::{Git2Pusher, PushRequest, RepoPusher};
//!
//! # async fn run() -> anyhow::Result<()> {
//! Git2Pusher
//!     .push(PushRequest {
//!         dir: "./skeleton".into(),
//!         remote_url: "https://bitbucket.org/w/r.git".into(),
//!         auth: GitAuth::token("user-token"),
//!         default_branch: "master".into(),
//!         commit_message: None,
//!         author: GitAuthorInfo::default(),
//!     })
//!     .await
//! # }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use git2::{Cred, IndexAddOption, PushOptions, RemoteCallbacks, Repository, RepositoryInitOptions, Signature};
use tracing::{debug, info};

use crate::auth::GitAuth;
use crate::config::GitAuthorInfo;

/// Commit message used when none is configured.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";

/// Author name used when none is configured.
pub const DEFAULT_AUTHOR_NAME: &str = "Scaffolder";

/// Author email used when none is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "scaffolder@backstage.io";

/// Everything needed to publish one directory.
#[derive(Debug, Clone)]
pub struct PushRequest {
    /// Directory whose contents become the first commit
    pub dir: PathBuf,
    /// Remote to push to
    pub remote_url: String,
    /// Credentials for the remote
    pub auth: GitAuth,
    /// Branch created and pushed
    pub default_branch: String,
    /// Commit message, [`DEFAULT_COMMIT_MESSAGE`] when unset
    pub commit_message: Option<String>,
    /// Commit author, defaults apply per missing field
    pub author: GitAuthorInfo,
}

impl PushRequest {
    fn message(&self) -> &str {
        self.commit_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_COMMIT_MESSAGE)
    }

    fn signature(&self) -> Result<Signature<'static>> {
        let name = self.author.name.as_deref().unwrap_or(DEFAULT_AUTHOR_NAME);
        let email = self.author.email.as_deref().unwrap_or(DEFAULT_AUTHOR_EMAIL);
        Ok(Signature::now(name, email)?)
    }
}

/// Publishes a directory to a remote repository.
#[async_trait]
pub trait RepoPusher: Send + Sync {
    async fn push(&self, request: PushRequest) -> Result<()>;
}

/// [`RepoPusher`] backed by libgit2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Pusher;

#[async_trait]
impl RepoPusher for Git2Pusher {
    async fn push(&self, request: PushRequest) -> Result<()> {
        tokio::task::spawn_blocking(move || init_and_push(&request))
            .await
            .context("Git push task failed")?
    }
}

/// Initializes `request.dir`, commits everything and pushes the branch.
pub fn init_and_push(request: &PushRequest) -> Result<()> {
    let mut init = RepositoryInitOptions::new();
    init.initial_head(&request.default_branch);
    let repo = Repository::init_opts(&request.dir, &init)
        .with_context(|| format!("Failed to init repository in {}", request.dir.display()))?;

    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let signature = request.signature()?;
    let commit = repo.commit(Some("HEAD"), &signature, &signature, request.message(), &tree, &[])?;
    debug!(%commit, branch = %request.default_branch, "Created initial commit");

    let mut remote = repo.remote("origin", &request.remote_url)?;

    let username = request.auth.username.clone();
    let password = request.auth.password.clone();
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username_from_url, _allowed| {
        Cred::userpass_plaintext(&username, &password)
    });
    callbacks.push_update_reference(check_ref_update);
    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{0}:refs/heads/{0}", request.default_branch);
    remote
        .push(&[refspec.as_str()], Some(&mut options))
        .with_context(|| format!("Failed to push to {}", request.remote_url))?;

    info!(remote = %request.remote_url, branch = %request.default_branch, "Pushed initial content");
    Ok(())
}

/// Fails the push when the remote rejected a reference update.
///
/// Smart HTTP remotes report hook and branch-restriction rejections per
/// reference instead of failing the whole push.
fn check_ref_update(refname: &str, status: Option<&str>) -> Result<(), git2::Error> {
    match status {
        None => Ok(()),
        Some(reason) => Err(git2::Error::from_str(&format!(
            "Remote rejected {refname}: {reason}"
        ))),
    }
}
