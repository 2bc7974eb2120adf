//
//  bitbucket-scaffolder
//  api/common/url.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request URL composition.

use ::url::Url;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{ApiError, RequestOptions};

/// Characters left untouched by `encodeURIComponent`; everything else in a
/// path segment is percent-encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single path segment (workspace, repository slug).
///
/// Slashes and other reserved characters are encoded so a segment can never
/// change which endpoint a request is routed to.
///
/// ```rust
/// use bitbucket_scaffolder::api::common::encode_segment;
///
/// assert_eq!(encode_segment("my workspace"), "my%20workspace");
/// assert_eq!(encode_segment("a/b"), "a%2Fb");
/// assert_eq!(encode_segment("repo-name_1.0"), "repo-name_1.0");
/// ```
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Builds a request URL from the API base, an already-encoded endpoint path
/// and the truthy query parameters of `options`.
///
/// The endpoint is concatenated verbatim; no validation of the endpoint is
/// performed beyond the URL parse.
pub fn build_url(base: &str, endpoint: &str, options: &RequestOptions) -> Result<Url, ApiError> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), endpoint))?;

    let pairs = options.query_pairs();
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (name, value) in &pairs {
            query.append_pair(name, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_without_options() {
        let url = build_url(
            "https://api.bitbucket.org/2.0",
            "/repositories/workspace/repo/pipelines_config",
            &RequestOptions::default(),
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.bitbucket.org/2.0/repositories/workspace/repo/pipelines_config"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_encodes_query_and_segments() {
        let options = RequestOptions {
            page: Some(2),
            q: Some("name ~ \"api\"".to_string()),
            sort: Some(String::new()),
            ..Default::default()
        };
        let endpoint = format!("/repositories/{}", encode_segment("my workspace"));
        let url = build_url("https://api.bitbucket.org/2.0/", &endpoint, &options).unwrap();

        assert_eq!(url.path(), "/2.0/repositories/my%20workspace");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "name ~ \"api\"".to_string())
            ]
        );
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        assert!(matches!(
            build_url("not a base", "/x", &RequestOptions::default()),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
