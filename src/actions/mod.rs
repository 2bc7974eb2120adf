//
//  bitbucket-scaffolder
//  actions/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Scaffolder Actions
//!
//! Template actions are the units of work a developer portal runs while
//! executing a software template. Each action has a stable id, a JSON Schema
//! describing its input and output, and an async handler.
//!
//! ## Built-in Actions
//!
//! | Id | Action |
//! |----|--------|
//! | `bitbucketCloud:repo:create` | [`BitbucketCloudRepoCreateAction`] |
//! | `bitbucketCloud:pipeline:enable` | [`BitbucketCloudEnablePipelineAction`] |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bitbucket_scaffolder::actions::{ActionContext, ActionRegistry};
//! use bitbucket_scaffolder::config::{Config, ScmIntegrations};
//! use bitbucket_scaffolder::context::Git2Pusher;
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
//!     json!({ "repoUrl": "bitbucket.org?workspace=w&project=p&repo=r" }),
//!     ".",
//! );
//! registry.run("bitbucketCloud:pipeline:enable", &mut ctx).await?;
//! println!("{:?}", ctx.outputs());
//! # Ok(())
//! # }
//! ```

mod pipeline_enable;
mod repo_create;

pub use pipeline_enable::*;
pub use repo_create::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::{IntegrationRegistry, ScaffolderConfig};
use crate::context::RepoPusher;

/// JSON Schemas of an action's input and output objects.
#[derive(Debug, Clone, Serialize)]
pub struct ActionSchema {
    pub input: Value,
    pub output: Value,
}

/// Per-invocation state handed to an action handler.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Raw input object
    pub input: Value,
    /// Directory holding the rendered template content
    pub workspace_path: PathBuf,
    outputs: BTreeMap<String, Value>,
}

impl ActionContext {
    pub fn new(input: Value, workspace_path: impl AsRef<Path>) -> Self {
        Self {
            input,
            workspace_path: workspace_path.as_ref().to_path_buf(),
            outputs: BTreeMap::new(),
        }
    }

    /// Decodes the input object into the action's typed input.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.input.clone()).context("Invalid action input")
    }

    /// Records a named output value.
    pub fn output(&mut self, name: &str, value: impl Into<Value>) {
        self.outputs.insert(name.to_string(), value.into());
    }

    /// Outputs recorded so far.
    pub fn outputs(&self) -> &BTreeMap<String, Value> {
        &self.outputs
    }
}

/// A unit of work that can be run by the scaffolder.
#[async_trait]
pub trait TemplateAction: Send + Sync {
    /// Stable identifier, e.g. `bitbucketCloud:repo:create`.
    fn id(&self) -> &'static str;

    /// One-line human description.
    fn description(&self) -> &'static str;

    /// JSON Schemas of the input and output objects.
    fn schema(&self) -> ActionSchema;

    /// Runs the action. Errors abort the action and propagate unchanged.
    async fn handler(&self, ctx: &mut ActionContext) -> Result<()>;
}

/// Actions keyed by id.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, Arc<dyn TemplateAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every Bitbucket Cloud action.
    pub fn builtin(
        integrations: Arc<dyn IntegrationRegistry>,
        config: ScaffolderConfig,
        pusher: Arc<dyn RepoPusher>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BitbucketCloudRepoCreateAction::new(
            integrations.clone(),
            config,
            pusher,
        )));
        registry.register(Arc::new(BitbucketCloudEnablePipelineAction::new(integrations)));
        registry
    }

    /// Adds an action, replacing any action with the same id.
    pub fn register(&mut self, action: Arc<dyn TemplateAction>) {
        self.actions.insert(action.id(), action);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn TemplateAction>> {
        self.actions.get(id).cloned()
    }

    /// Registered actions, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &Arc<dyn TemplateAction>> {
        self.actions.values()
    }

    /// Looks up `id` and runs it against `ctx`.
    pub async fn run(&self, id: &str, ctx: &mut ActionContext) -> Result<()> {
        let action = self
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown action '{id}'"))?;
        info!(action = id, "Running action");
        action.handler(ctx).await
    }
}
