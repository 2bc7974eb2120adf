//
//  bitbucket-scaffolder
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Locator Resolver
//!
//! The portal addresses repositories with a scheme-less locator:
//!
//! ```text
//! bitbucket.org?workspace=my-workspace&project=PROJ&repo=my-repo
//! ```
//!
//! ## Resolution Order
//!
//! Failures are reported in a fixed order so the first problem the user sees
//! is always the same one:
//! 1. `workspace`, then `project`, then `repo` must be present
//! 2. an integration must be registered for the host
//! 3. a credential must be available: an explicit token wins, otherwise the
//!    integration's username + app password

use tracing::debug;
use url::Url;

use super::{BitbucketTarget, RepoLocation, ResolveError};
use crate::auth::AuthCredential;
use crate::config::IntegrationRegistry;

/// Parses a repository locator.
///
/// The locator is read as `https://{repo_url}`. Empty query values count as
/// absent.
pub fn parse_repo_url(repo_url: &str) -> Result<RepoLocation, ResolveError> {
    let parsed = Url::parse(&format!("https://{}", repo_url)).map_err(|e| {
        ResolveError::InvalidInput(format!("Invalid repo URL passed to publisher: {repo_url}, {e}"))
    })?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            ResolveError::InvalidInput(format!(
                "Invalid repo URL passed to publisher: {repo_url}, missing host"
            ))
        })?
        .to_string();

    let param = |name: &str| {
        parsed
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    };

    Ok(RepoLocation {
        host,
        workspace: param("workspace"),
        project: param("project"),
        repo: param("repo"),
    })
}

/// Resolves a repository locator into a [`BitbucketTarget`].
///
/// `token` is the caller-supplied user login token, if any. An empty token is
/// treated as absent.
pub fn resolve_target(
    repo_url: &str,
    registry: &dyn IntegrationRegistry,
    token: Option<&str>,
) -> Result<BitbucketTarget, ResolveError> {
    let location = parse_repo_url(repo_url)?;

    let missing = |field: &str| {
        ResolveError::InvalidInput(format!(
            "Invalid URL provider was included in the repo URL to create {repo_url}, missing {field}"
        ))
    };
    let workspace = location.workspace.ok_or_else(|| missing("workspace"))?;
    let project = location.project.ok_or_else(|| missing("project"))?;
    let repo = location.repo.ok_or_else(|| missing("repo"))?;

    let integration = registry
        .by_host(&location.host)
        .ok_or_else(|| ResolveError::NoMatchingIntegration(location.host.clone()))?;

    let authorization = match token.filter(|t| !t.is_empty()) {
        Some(token) => AuthCredential::bearer(token),
        None => match integration.app_password_credentials() {
            Some((username, app_password)) => AuthCredential::app_password(username, app_password),
            None => return Err(ResolveError::MissingAuthorization),
        },
    };

    debug!(host = %location.host, %workspace, %repo, "Resolved Bitbucket target");

    Ok(BitbucketTarget {
        api_base_url: integration.api_base_url.clone(),
        authorization,
        integration: integration.clone(),
        workspace,
        project,
        repo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BitbucketCloudIntegration, ScmIntegrations};

    fn registry_with_credentials() -> ScmIntegrations {
        ScmIntegrations::new(vec![BitbucketCloudIntegration {
            username: Some("u".to_string()),
            app_password: Some("p".to_string()),
            ..Default::default()
        }])
    }

    #[test]
    fn test_parse_repo_url() {
        let location = parse_repo_url("bitbucket.org?workspace=w&project=p&repo=r").unwrap();
        assert_eq!(location.host, "bitbucket.org");
        assert_eq!(location.workspace.as_deref(), Some("w"));
        assert_eq!(location.project.as_deref(), Some("p"));
        assert_eq!(location.repo.as_deref(), Some("r"));
    }

    #[test]
    fn test_parse_repo_url_decodes_values() {
        let location = parse_repo_url("bitbucket.org?workspace=my%20ws&repo=r").unwrap();
        assert_eq!(location.workspace.as_deref(), Some("my ws"));
        assert!(location.project.is_none());
    }

    #[test]
    fn test_missing_parts_are_reported_in_order() {
        let registry = registry_with_credentials();

        let err = resolve_target("bitbucket.org?project=p&repo=r", &registry, None).unwrap_err();
        assert!(err.to_string().contains("missing workspace"));

        let err = resolve_target("bitbucket.org?workspace=w&repo=r", &registry, None).unwrap_err();
        assert!(err.to_string().contains("missing project"));

        let err = resolve_target("bitbucket.org?workspace=w&project=p", &registry, None).unwrap_err();
        assert!(err.to_string().contains("missing repo"));

        // Input errors win over an unknown host.
        let err = resolve_target("missing.com?project=p&repo=r", &registry, None).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInput(_)));
    }

    #[test]
    fn test_unknown_host() {
        let err = resolve_target(
            "missing.com?workspace=w&project=p&repo=r",
            &registry_with_credentials(),
            None,
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("No matching integration configuration for host missing.com"));
    }

    #[test]
    fn test_no_credentials() {
        let err = resolve_target(
            "bitbucket.org?workspace=w&project=p&repo=r",
            &ScmIntegrations::new(Vec::new()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::MissingAuthorization));
        assert!(err
            .to_string()
            .contains("Authorization has not been provided for Bitbucket Cloud"));
    }

    #[test]
    fn test_app_password_credentials() {
        let target = resolve_target(
            "bitbucket.org?workspace=w&project=p&repo=r",
            &registry_with_credentials(),
            None,
        )
        .unwrap();
        assert_eq!(target.authorization.header_value(), "Basic dTpw");
        assert_eq!(target.api_base_url, "https://api.bitbucket.org/2.0");
        assert_eq!(target.project, "p");
    }

    #[test]
    fn test_token_wins_over_app_password() {
        let target = resolve_target(
            "bitbucket.org?workspace=w&project=p&repo=r",
            &registry_with_credentials(),
            Some("user-token"),
        )
        .unwrap();
        assert_eq!(target.authorization.header_value(), "Bearer user-token");
    }

    #[test]
    fn test_token_without_stored_credentials() {
        let target = resolve_target(
            "bitbucket.org?workspace=w&project=p&repo=r",
            &ScmIntegrations::new(Vec::new()),
            Some("user-token"),
        )
        .unwrap();
        assert_eq!(target.authorization, AuthCredential::bearer("user-token"));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let err = resolve_target(
            "bitbucket.org?workspace=w&project=p&repo=r",
            &ScmIntegrations::new(Vec::new()),
            Some(""),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::MissingAuthorization));
    }
}
