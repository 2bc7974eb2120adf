//
//  bitbucket-scaffolder
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Configuration Module
//!
//! Constants for Bitbucket Cloud and host-name normalization.
//!
//! ## Usage
//!
//! ```rust
//! use bitbucket_scaffolder::config::{normalize_host, BITBUCKET_CLOUD_API_BASE_URL};
//!
//! let host = normalize_host("https://BITBUCKET.ORG/");
//! assert_eq!(host, "bitbucket.org");
//!
//! assert_eq!(BITBUCKET_CLOUD_API_BASE_URL, "https://api.bitbucket.org/2.0");
//! ```

/// The primary hostname for Bitbucket Cloud.
///
/// This is the host that appears in repo URLs such as
/// `bitbucket.org?workspace=w&project=p&repo=r`.
pub const BITBUCKET_CLOUD: &str = "bitbucket.org";

/// Base URL of the Bitbucket Cloud REST API v2.0.
///
/// Endpoint paths such as `/repositories/{workspace}` are appended to it.
pub const BITBUCKET_CLOUD_API_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Normalizes a host URL to a consistent hostname format.
///
/// Removes protocol prefixes and a trailing slash, trims whitespace and
/// lowercases the result.
///
/// ```rust
/// use bitbucket_scaffolder::config::normalize_host;
///
/// assert_eq!(normalize_host("https://bitbucket.org"), "bitbucket.org");
/// assert_eq!(normalize_host("bitbucket.org/"), "bitbucket.org");
/// assert_eq!(normalize_host("  HTTPS://BitBucket.Org/  "), "bitbucket.org");
/// ```
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("https://").unwrap_or(&host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    host.strip_suffix('/').unwrap_or(host).to_string()
}
