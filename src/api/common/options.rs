//
//  bitbucket-scaffolder
//  api/common/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query options accepted by Bitbucket Cloud list endpoints.
//!
//! Bitbucket Cloud list endpoints understand a small, shared set of query
//! parameters:
//!
//! | Parameter | Struct | Meaning |
//! |-----------|--------|---------|
//! | `page`, `pagelen` | [`PaginationOptions`] | Page number and page size |
//! | `q`, `sort` | [`FilterAndSortOptions`] | BBQL filter and sort field |
//! | `fields` | [`PartialResponseOptions`] | Partial response field selection |
//!
//! All of them are merged into a flat [`RequestOptions`] before a URL is
//! built. Values that are "falsy" (absent, empty strings, zero) are never
//! serialized, so `RequestOptions { q: Some(String::new()), .. }` produces
//! no `q=` parameter at all.

/// Default page size requested when iterating pages.
pub const DEFAULT_PAGELEN: u32 = 100;

/// Page number and page size for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationOptions {
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Number of items per page.
    pub pagelen: Option<u32>,
}

impl PaginationOptions {
    /// Options used for the first request of an iteration: page 1 with
    /// [`DEFAULT_PAGELEN`] items, unless the caller set either field.
    pub fn with_defaults(&self) -> Self {
        Self {
            page: self.page.or(Some(1)),
            pagelen: self.pagelen.or(Some(DEFAULT_PAGELEN)),
        }
    }
}

/// BBQL filtering and sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterAndSortOptions {
    /// BBQL query, e.g. `name ~ "service"`.
    pub q: Option<String>,
    /// Field to sort by, prefix with `-` for descending order.
    pub sort: Option<String>,
}

/// Partial response field selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialResponseOptions {
    /// Comma separated field selector, e.g. `values.slug,next`.
    pub fields: Option<String>,
}

/// Caller-facing options for list and search operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Filtering and sorting.
    pub filter: FilterAndSortOptions,
    /// Field selection.
    pub partial: PartialResponseOptions,
}

/// Flat set of query parameters for a single request.
///
/// Serialized by [`RequestOptions::query_pairs`] in declaration order,
/// skipping every falsy value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub page: Option<u32>,
    pub pagelen: Option<u32>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub fields: Option<String>,
    pub search_query: Option<String>,
}

impl RequestOptions {
    /// Merges pagination options with caller list options. Pagination comes
    /// first, list options are layered on top.
    pub fn merged(pagination: &PaginationOptions, list: &ListOptions) -> Self {
        Self {
            page: pagination.page,
            pagelen: pagination.pagelen,
            q: list.filter.q.clone(),
            sort: list.filter.sort.clone(),
            fields: list.partial.fields.clone(),
            search_query: None,
        }
    }

    /// Sets the `search_query` parameter used by code search.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Returns the truthy parameters as `(name, value)` pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let numbers = [("page", self.page), ("pagelen", self.pagelen)];
        let strings = [
            ("q", &self.q),
            ("sort", &self.sort),
            ("fields", &self.fields),
            ("search_query", &self.search_query),
        ];

        numbers
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| *v != 0).map(|v| (name, v.to_string())))
            .chain(strings.into_iter().filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (name, v.to_string()))
            }))
            .collect()
    }
}
