//
//  bitbucket-scaffolder
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Bitbucket Cloud
//!
//! This module provides the HTTP client used by every scaffolder action. It
//! builds URLs, attaches the `Authorization` header and maps non-success
//! responses to [`ApiError::RequestFailed`].
//!
//! ## Features
//!
//! - Authentication header injection on every request
//! - JSON bodies for POST and PUT only
//! - Lazy paginated listings through [`WithPagination`]
//! - Custom User-Agent header
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_scaffolder::api::BitbucketCloudClient;
//! use bitbucket_scaffolder::auth::AuthCredential;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = BitbucketCloudClient::new("https://api.bitbucket.org/2.0")?
//!     .with_auth(AuthCredential::bearer("user-token"));
//!
//! let config = client.enable_repository_pipeline("my-team", "my-repo").await?;
//! assert!(config.enabled);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::cloud::{
    CreateRepositoryOptions, CreateRepositoryRequest, PipelinesConfig, Repository, SearchResultPage,
    UpdatePipelinesConfig,
};
use super::common::{
    build_url, encode_segment, extract_error_message, ApiError, ListOptions, PaginatedResponse,
    RequestOptions, WithPagination,
};
use crate::auth::AuthCredential;
use crate::config::BitbucketCloudIntegration;

/// HTTP client for the Bitbucket Cloud REST API.
///
/// The client is cheap to clone and holds no per-request state; the
/// credential is rendered into a header again for every request.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_scaffolder::api::BitbucketCloudClient;
/// use bitbucket_scaffolder::config::BitbucketCloudIntegration;
///
/// // Uses the integration's username + app password when both are set
/// let client = BitbucketCloudClient::from_config(&BitbucketCloudIntegration::default())?;
/// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BitbucketCloudClient {
    http: Client,
    base_url: String,
    auth: Option<AuthCredential>,
}

impl BitbucketCloudClient {
    /// Creates an unauthenticated client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    /// Creates a client from an integration, authenticated with its app
    /// password when one is configured.
    pub fn from_config(integration: &BitbucketCloudIntegration) -> Result<Self> {
        let client = Self::new(&integration.api_base_url)?;
        Ok(match integration.app_password_credentials() {
            Some((username, app_password)) => {
                client.with_auth(AuthCredential::app_password(username, app_password))
            }
            None => client,
        })
    }

    /// Replaces the client's credential.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// REST base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a URL for `endpoint` under the client's base URL.
    pub fn create_url(&self, endpoint: &str, options: &RequestOptions) -> Result<Url, ApiError> {
        build_url(&self.base_url, endpoint, options)
    }

    /// Sends one request and checks its status.
    ///
    /// `body` is serialized as JSON for POST and PUT and ignored otherwise.
    /// Any status outside 2xx becomes [`ApiError::RequestFailed`]; the
    /// server's error message, when present, is logged at debug level.
    pub async fn execute<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Response, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        debug!(%method, %url, "Sending request");
        let mut request = self.http.request(method.clone(), url.clone());

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        if method == Method::POST || method == Method::PUT {
            request = request.header(CONTENT_TYPE, "application/json");
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Some(message) = extract_error_message(&text) {
                debug!(%status, %message, "Bitbucket returned an error");
            }
            return Err(ApiError::RequestFailed {
                method,
                url: url.to_string(),
                status,
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response)
    }

    /// GETs `url` and decodes the JSON body as `T`.
    pub async fn get_type_mapped<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.execute::<()>(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    /// Lists the repositories of a workspace.
    ///
    /// `GET /repositories/{workspace}`
    pub fn list_repositories_by_workspace(
        &self,
        workspace: &str,
        options: &ListOptions,
    ) -> WithPagination<'_, PaginatedResponse<Repository>> {
        let endpoint = format!("/repositories/{}", encode_segment(workspace));
        let options = options.clone();

        WithPagination::new(
            move |pagination| self.create_url(&endpoint, &RequestOptions::merged(pagination, &options)),
            move |url| self.get_type_mapped(url),
        )
    }

    /// Searches code across a workspace.
    ///
    /// `GET /workspaces/{workspace}/search/code?search_query={query}`
    pub fn search_code(
        &self,
        workspace: &str,
        query: &str,
        options: &ListOptions,
    ) -> WithPagination<'_, SearchResultPage> {
        let endpoint = format!("/workspaces/{}/search/code", encode_segment(workspace));
        let options = options.clone();
        let query = query.to_string();

        WithPagination::new(
            move |pagination| {
                let request = RequestOptions::merged(pagination, &options).with_search_query(query.clone());
                self.create_url(&endpoint, &request)
            },
            move |url| self.get_type_mapped(url),
        )
    }

    /// Creates a repository inside a project.
    ///
    /// `POST /repositories/{workspace}/{repo}`
    pub async fn create_repository(&self, options: &CreateRepositoryOptions) -> Result<Repository, ApiError> {
        let endpoint = format!(
            "/repositories/{}/{}",
            encode_segment(&options.workspace),
            encode_segment(&options.repo)
        );
        let url = self.create_url(&endpoint, &RequestOptions::default())?;
        let body = CreateRepositoryRequest::new(
            options.description.clone(),
            options.is_private,
            options.project.clone(),
        );

        let response = self.execute(Method::POST, url, Some(&body)).await?;
        Ok(response.json().await?)
    }

    /// Turns on Pipelines for a repository.
    ///
    /// `PUT /repositories/{workspace}/{repo}/pipelines_config`
    pub async fn enable_repository_pipeline(&self, workspace: &str, repo: &str) -> Result<PipelinesConfig, ApiError> {
        let endpoint = format!(
            "/repositories/{}/{}/pipelines_config",
            encode_segment(workspace),
            encode_segment(repo)
        );
        let url = self.create_url(&endpoint, &RequestOptions::default())?;
        let body = UpdatePipelinesConfig::enable(repo);

        let response = self.execute(Method::PUT, url, Some(&body)).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = BitbucketCloudClient::new("http://localhost:1234/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_create_url_encodes_nothing_by_itself() {
        let client = BitbucketCloudClient::new("https://api.bitbucket.org/2.0").unwrap();
        let url = client
            .create_url("/repositories/my%20team", &RequestOptions::default())
            .unwrap();
        assert_eq!(url.as_str(), "https://api.bitbucket.org/2.0/repositories/my%20team");
    }

    #[test]
    fn test_from_config_without_credentials() {
        let client = BitbucketCloudClient::from_config(&BitbucketCloudIntegration::default()).unwrap();
        assert!(client.auth.is_none());
    }

    #[test]
    fn test_from_config_with_credentials() {
        let integration = BitbucketCloudIntegration {
            username: Some("u".to_string()),
            app_password: Some("p".to_string()),
            ..Default::default()
        };
        let client = BitbucketCloudClient::from_config(&integration).unwrap();
        assert_eq!(client.auth, Some(AuthCredential::app_password("u", "p")));
    }
}
