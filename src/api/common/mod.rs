//
//  bitbucket-scaffolder
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Cloud client
//!
//! This module provides the shared building blocks used by every Cloud endpoint:
//! error handling, URL composition, query options and pagination.
//!
//! # Overview
//!
//! - [`ApiError`] - Error type for request execution
//! - [`Link`] - HATEOAS-style link representation
//! - URL building (re-exported from the `url` submodule)
//! - Query options (re-exported from the `options` submodule)
//! - Pagination types (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use bitbucket_scaffolder::api::common::{build_url, encode_segment, RequestOptions};
//!
//! let options = RequestOptions {
//!     pagelen: Some(50),
//!     q: Some(String::new()),
//!     ..Default::default()
//! };
//! let url = build_url(
//!     "https://api.bitbucket.org/2.0",
//!     &format!("/repositories/{}", encode_segment("my workspace")),
//!     &options,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     url.as_str(),
//!     "https://api.bitbucket.org/2.0/repositories/my%20workspace?pagelen=50"
//! );
//! ```

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod options;
mod pagination;
mod url;

pub use self::options::*;
pub use self::pagination::*;
pub use self::url::*;

/// Error type for Bitbucket Cloud API operations.
///
/// | Variant | Description |
/// |---------|-------------|
/// | `RequestFailed` | The server answered with a non-2xx status |
/// | `InvalidUrl` | A request URL (or a server-provided `next` link) did not parse |
/// | `Network` | Transport failure or an undecodable response body |
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::api::common::ApiError;
/// use reqwest::{Method, StatusCode};
///
/// let err = ApiError::RequestFailed {
///     method: Method::PUT,
///     url: "https://api.bitbucket.org/2.0/repositories/w/r/pipelines_config".to_string(),
///     status: StatusCode::NOT_FOUND,
///     status_text: "Not Found".to_string(),
/// };
///
/// assert!(err.to_string().contains("Expected 200 but got 404 - Not Found"));
/// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server responded outside the 2xx range.
    ///
    /// A single attempt is made per request; nothing is retried.
    #[error("Unexpected response for {method} {url}. Expected 200 but got {} - {status_text}", status.as_u16())]
    RequestFailed {
        /// HTTP method of the failed request.
        method: Method,
        /// Full request URL, including the query string.
        url: String,
        /// Status code returned by the server.
        status: StatusCode,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// A URL could not be composed or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),

    /// A network-level error occurred during the request, or the response
    /// body could not be decoded.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::RequestFailed`], `None` otherwise.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extracts a human readable message from a Bitbucket error body.
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Returns `None` when the body is not JSON or carries no message.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    // Cloud format: {"type": "error", "error": {"message": "..."}}
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Alternative Cloud format: {"error": {"detail": "..."}}
    if let Some(detail) = json
        .get("error")
        .and_then(|e| e.get("detail"))
        .and_then(|m| m.as_str())
    {
        return Some(detail.to_string());
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// HATEOAS-style link for API resource navigation.
///
/// Bitbucket embeds links to related resources in most payloads, for
/// example `links.html` and `links.clone` on a repository.
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::api::common::Link;
///
/// let link: Link = serde_json::from_str(
///     r#"{"name": "https", "href": "https://bitbucket.org/workspace/repo.git"}"#,
/// ).unwrap();
///
/// assert_eq!(link.name.as_deref(), Some("https"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// The URL of the linked resource.
    pub href: String,

    /// Optional descriptive name for the link (`https`, `ssh`, ...).
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cloud_error_message() {
        let body = r#"{"type": "error", "error": {"message": "Repository not found"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Repository not found")
        );
    }

    #[test]
    fn test_extract_error_detail_and_plain_message() {
        assert_eq!(
            extract_error_message(r#"{"error": {"detail": "bad slug"}}"#).as_deref(),
            Some("bad slug")
        );
        assert_eq!(
            extract_error_message(r#"{"message": "nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(extract_error_message("<html>502</html>"), None);
    }

    #[test]
    fn test_request_failed_message() {
        let err = ApiError::RequestFailed {
            method: Method::GET,
            url: "https://api.bitbucket.org/2.0/repositories/w".to_string(),
            status: StatusCode::UNAUTHORIZED,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected response for GET https://api.bitbucket.org/2.0/repositories/w. \
             Expected 200 but got 401 - Unauthorized"
        );
    }
}
