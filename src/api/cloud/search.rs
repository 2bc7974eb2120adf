//
//  bitbucket-scaffolder
//  api/cloud/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Code search result types.
//!
//! `GET /workspaces/{workspace}/search/code?search_query=...` returns a
//! paginated listing whose pages carry one extra flag,
//! `query_substituted`, on top of the usual pagination fields.

use serde::{Deserialize, Serialize};

use crate::api::common::{PaginatedResponse, Paginated};

/// One page of code search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultPage {
    /// Whether Bitbucket rewrote the query before running it.
    #[serde(default)]
    pub query_substituted: bool,

    #[serde(flatten)]
    pub page: PaginatedResponse<SearchCodeSearchResult>,
}

impl Paginated for SearchResultPage {
    type Item = SearchCodeSearchResult;

    fn next_link(&self) -> Option<&str> {
        self.page.next_url()
    }

    fn into_values(self) -> Vec<SearchCodeSearchResult> {
        self.page.values
    }
}

/// A file matching a code search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCodeSearchResult {
    /// Result type, `code_search_result`.
    #[serde(rename = "type", default)]
    pub result_type: Option<String>,

    /// Number of matches in the file content.
    #[serde(default)]
    pub content_match_count: u32,

    /// Matched lines with their highlighted segments.
    #[serde(default)]
    pub content_matches: Vec<SearchContentMatch>,

    /// Matched segments of the file path.
    #[serde(default)]
    pub path_matches: Vec<SearchSegment>,

    /// The file that matched.
    #[serde(default)]
    pub file: Option<SearchFile>,
}

impl SearchCodeSearchResult {
    /// Path of the matching file, empty when the result has no file.
    pub fn path(&self) -> &str {
        self.file
            .as_ref()
            .and_then(|f| f.path.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchContentMatch {
    #[serde(default)]
    pub lines: Vec<SearchLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchLine {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub segments: Vec<SearchSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSegment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub r#match: bool,
}

/// File reference inside a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFile {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_decodes_flattened_pagination() {
        let json = r#"{
            "size": 1,
            "page": 1,
            "pagelen": 10,
            "query_substituted": false,
            "next": "https://api.bitbucket.org/2.0/workspaces/w/search/code?page=2",
            "values": [{
                "type": "code_search_result",
                "content_match_count": 2,
                "content_matches": [{"lines": [{"line": 3, "segments": [{"text": "foo", "match": true}]}]}],
                "path_matches": [],
                "file": {"path": "src/main.rs", "type": "commit_file"}
            }]
        }"#;

        let page: SearchResultPage = serde_json::from_str(json).unwrap();
        assert!(page.next_link().is_some());
        let results = page.into_values();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path(), "src/main.rs");
        assert!(results[0].content_matches[0].lines[0].segments[0].r#match);
    }
}
