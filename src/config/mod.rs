//
//  bitbucket-scaffolder
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads the scaffolder configuration from a TOML file. The configuration is
//! read once at startup and is immutable afterwards.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bb-scaffold/config.toml`
//! - **macOS**: `~/Library/Application Support/bb-scaffold/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bb-scaffold\config.toml`
//!
//! The location can be overridden with `--config` or `BB_SCAFFOLD_CONFIG`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [[integrations.bitbucket_cloud]]
//! username = "my-user"
//! app_password = "app-password"
//!
//! [scaffolder]
//! default_commit_message = "Initial commit"
//!
//! [scaffolder.default_author]
//! name = "Scaffolder"
//! email = "scaffolder@example.com"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bitbucket_scaffolder::config::{Config, IntegrationRegistry, ScmIntegrations};
//!
//! let config = Config::from_toml(r#"
//!     [[integrations.bitbucket_cloud]]
//!     username = "u"
//!     app_password = "p"
//! "#)?;
//!
//! let integrations = ScmIntegrations::from_config(&config);
//! let cloud = integrations.by_host("bitbucket.org").unwrap();
//! assert_eq!(cloud.username.as_deref(), Some("u"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`hosts`]: Bitbucket Cloud host constants and normalization
//! - [`integrations`]: Integration registry

mod hosts;
mod integrations;

pub use hosts::*;
pub use integrations::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Global configuration container.
///
/// # Fields
///
/// * `integrations` - Per-host SCM integrations
/// * `scaffolder` - Defaults applied when publishing repository content
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub integrations: IntegrationsConfig,

    #[serde(default)]
    pub scaffolder: ScaffolderConfig,
}

/// The `[integrations]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntegrationsConfig {
    /// Bitbucket Cloud integrations, one per host.
    #[serde(default, alias = "bitbucketCloud")]
    pub bitbucket_cloud: Vec<BitbucketCloudIntegration>,
}

/// The `[scaffolder]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScaffolderConfig {
    /// Author of the initial commit.
    #[serde(default, alias = "defaultAuthor")]
    pub default_author: GitAuthorInfo,

    /// Message of the initial commit.
    #[serde(default, alias = "defaultCommitMessage")]
    pub default_commit_message: Option<String>,
}

/// Optional author identity for commits made by the scaffolder.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GitAuthorInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl Config {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one the default
    /// location is used, falling back to [`Config::default`] when no file is
    /// there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert!(config.integrations.bitbucket_cloud.is_empty());
        assert_eq!(config.scaffolder.default_author, GitAuthorInfo::default());
        assert!(config.scaffolder.default_commit_message.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [[integrations.bitbucket_cloud]]
            host = "bitbucket.org"
            api_base_url = "http://localhost:1234"
            username = "u"
            app_password = "p"

            [scaffolder]
            default_commit_message = "chore: scaffold"

            [scaffolder.default_author]
            name = "Portal"
            email = "portal@example.com"
            "#,
        )
        .unwrap();

        let cloud = &config.integrations.bitbucket_cloud[0];
        assert_eq!(cloud.api_base_url, "http://localhost:1234");
        assert_eq!(cloud.app_password.as_deref(), Some("p"));
        assert_eq!(
            config.scaffolder.default_commit_message.as_deref(),
            Some("chore: scaffold")
        );
        assert_eq!(config.scaffolder.default_author.name.as_deref(), Some("Portal"));
    }

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let config = Config::from_toml(
            r#"
            [[integrations.bitbucketCloud]]
            username = "u"
            appPassword = "p"
            "#,
        )
        .unwrap();

        let cloud = &config.integrations.bitbucket_cloud[0];
        assert_eq!(cloud.host, "bitbucket.org");
        assert_eq!(cloud.app_password.as_deref(), Some("p"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scaffolder]\ndefault_commit_message = \"hi\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.scaffolder.default_commit_message.as_deref(), Some("hi"));
    }
}
