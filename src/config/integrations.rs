//
//  bitbucket-scaffolder
//  config/integrations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Integration registry: per-host Bitbucket Cloud credentials.
//!
//! The registry is built once from the loaded [`Config`](super::Config) and
//! is read-only afterwards. It is passed explicitly to whoever needs a
//! lookup, through the [`IntegrationRegistry`] trait.
//!
//! A `bitbucket.org` integration is always present. When the config file
//! does not declare one, a credential-less default pointing at
//! [`BITBUCKET_CLOUD_API_BASE_URL`] is added, so an unconfigured
//! `bitbucket.org` resolves to "no authorization" rather than "no
//! integration".

use serde::{Deserialize, Serialize};

use super::hosts::{normalize_host, BITBUCKET_CLOUD, BITBUCKET_CLOUD_API_BASE_URL};
use super::Config;

/// Configuration of one Bitbucket Cloud integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitbucketCloudIntegration {
    /// Host the integration applies to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Base URL of the REST API, without a trailing slash.
    #[serde(default = "default_api_base_url", alias = "apiBaseUrl")]
    pub api_base_url: String,

    /// Username for app password authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// App password paired with `username`.
    #[serde(default, alias = "appPassword")]
    pub app_password: Option<String>,
}

fn default_host() -> String {
    BITBUCKET_CLOUD.to_string()
}

fn default_api_base_url() -> String {
    BITBUCKET_CLOUD_API_BASE_URL.to_string()
}

impl Default for BitbucketCloudIntegration {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_base_url: default_api_base_url(),
            username: None,
            app_password: None,
        }
    }
}

impl BitbucketCloudIntegration {
    /// Returns the username and app password when both are set and non-empty.
    pub fn app_password_credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.app_password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Lookup of integration configuration by host name.
pub trait IntegrationRegistry: Send + Sync {
    /// Returns the integration registered for `host`, if any.
    fn by_host(&self, host: &str) -> Option<&BitbucketCloudIntegration>;
}

/// The integrations declared in the config file.
#[derive(Debug, Clone, Default)]
pub struct ScmIntegrations {
    bitbucket_cloud: Vec<BitbucketCloudIntegration>,
}

impl ScmIntegrations {
    /// Builds the registry from the loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.integrations.bitbucket_cloud.clone())
    }

    /// Builds the registry from explicit integrations, normalizing hosts and
    /// adding the default `bitbucket.org` entry when it is missing.
    pub fn new(integrations: Vec<BitbucketCloudIntegration>) -> Self {
        let mut bitbucket_cloud: Vec<BitbucketCloudIntegration> = integrations
            .into_iter()
            .map(|mut integration| {
                integration.host = normalize_host(&integration.host);
                integration.api_base_url = integration.api_base_url.trim_end_matches('/').to_string();
                integration
            })
            .collect();

        if !bitbucket_cloud.iter().any(|i| i.host == BITBUCKET_CLOUD) {
            bitbucket_cloud.push(BitbucketCloudIntegration::default());
        }

        Self { bitbucket_cloud }
    }

    /// All registered Bitbucket Cloud integrations.
    pub fn bitbucket_cloud(&self) -> &[BitbucketCloudIntegration] {
        &self.bitbucket_cloud
    }
}

impl IntegrationRegistry for ScmIntegrations {
    fn by_host(&self, host: &str) -> Option<&BitbucketCloudIntegration> {
        let host = normalize_host(host);
        self.bitbucket_cloud.iter().find(|i| i.host == host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cloud_integration_is_always_present() {
        let registry = ScmIntegrations::new(Vec::new());
        let integration = registry.by_host("bitbucket.org").unwrap();
        assert_eq!(integration.api_base_url, "https://api.bitbucket.org/2.0");
        assert!(integration.app_password_credentials().is_none());
        assert!(registry.by_host("missing.com").is_none());
    }

    #[test]
    fn test_configured_integration_replaces_default() {
        let registry = ScmIntegrations::new(vec![BitbucketCloudIntegration {
            host: "Bitbucket.org".to_string(),
            api_base_url: "http://127.0.0.1:8080/".to_string(),
            username: Some("u".to_string()),
            app_password: Some("p".to_string()),
        }]);

        assert_eq!(registry.bitbucket_cloud().len(), 1);
        let integration = registry.by_host("BITBUCKET.ORG").unwrap();
        assert_eq!(integration.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(integration.app_password_credentials(), Some(("u", "p")));
    }

    #[test]
    fn test_host_with_upper_case_scheme_replaces_default() {
        let config = Config::from_toml(
            r#"
            [[integrations.bitbucket_cloud]]
            host = "HTTPS://Bitbucket.org/"
            username = "u"
            app_password = "p"
            "#,
        )
        .unwrap();
        let registry = ScmIntegrations::from_config(&config);

        assert_eq!(registry.bitbucket_cloud().len(), 1);
        let integration = registry.by_host("bitbucket.org").unwrap();
        assert_eq!(integration.host, "bitbucket.org");
        assert_eq!(integration.app_password_credentials(), Some(("u", "p")));
    }

    #[test]
    fn test_username_without_password_is_not_a_credential() {
        let integration = BitbucketCloudIntegration {
            username: Some("u".to_string()),
            ..Default::default()
        };
        assert!(integration.app_password_credentials().is_none());
    }
}
