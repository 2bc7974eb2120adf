//
//  bitbucket-scaffolder
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Bitbucket Cloud API responses
//!
//! Bitbucket Cloud uses cursor-based pagination: every page carries an
//! optional `next` URL and iteration ends on the first page without one.
//! The `next` URL is authoritative and may contain server-side cursor state,
//! so it is followed verbatim instead of being rebuilt from options.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PaginatedResponse`] | Generic `{values, next, ...}` page |
//! | [`Paginated`] | Trait implemented by every page type |
//! | [`WithPagination`] | Lazy, restartable page/item streams |
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_scaffolder::api::common::{ListOptions, PaginationOptions};
//! use bitbucket_scaffolder::api::BitbucketCloudClient;
//! use bitbucket_scaffolder::config::BitbucketCloudIntegration;
//! use futures::TryStreamExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = BitbucketCloudClient::from_config(&BitbucketCloudIntegration::default())?;
//! let repos = client.list_repositories_by_workspace("my-team", &ListOptions::default());
//!
//! let all: Vec<_> = repos
//!     .iterate_results(&PaginationOptions::default())
//!     .try_collect()
//!     .await?;
//! println!("{} repositories", all.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Pages are fetched one at a time, only when the stream is polled
//! - A failed fetch is yielded as an `Err` and ends the stream
//! - To start over, call [`WithPagination::iterate_pages`] again

use std::future::Future;

use ::url::Url;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiError, PaginationOptions};

/// A single decoded page of a paginated listing.
pub trait Paginated {
    /// Element type of the page's `values`.
    type Item;

    /// The server-provided link to the next page, if any.
    fn next_link(&self) -> Option<&str>;

    /// Consumes the page, returning its items in server order.
    fn into_values(self) -> Vec<Self::Item>;
}

/// Paginated response from Bitbucket Cloud API.
///
/// `PaginatedResponse` represents a single page of results from the Bitbucket Cloud
/// REST API (v2.0). Each response includes links to the next and previous pages.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `values` array
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Array of items in the current page |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total number of items across all pages |
/// | `next` | `Option<String>` | URL to fetch the next page |
/// | `previous` | `Option<String>` | URL to fetch the previous page |
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::api::common::PaginatedResponse;
/// use serde::Deserialize;
///
/// #[derive(Clone, Deserialize)]
/// struct Repository {
///     slug: String,
/// }
///
/// let json = r#"{
///     "values": [{"slug": "repo1"}],
///     "page": 1,
///     "pagelen": 10,
///     "size": 25,
///     "next": "https://api.bitbucket.org/2.0/repositories/team?page=2"
/// }"#;
///
/// let response: PaginatedResponse<Repository> = serde_json::from_str(json).unwrap();
/// assert!(response.has_next());
/// assert_eq!(response.values[0].slug, "repo1");
/// ```
///
/// # Notes
///
/// - The `size` field may not always be present for performance reasons
/// - The `values` field defaults to empty when a partial response omits it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Array of items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL to fetch the next page of results.
    ///
    /// When `None`, there are no more pages to fetch.
    #[serde(default)]
    pub next: Option<String>,

    /// URL to fetch the previous page of results.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        self.next_url().is_some()
    }

    /// Returns the URL for the next page of results.
    ///
    /// An empty `next` string is treated as absent.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

impl<T> Paginated for PaginatedResponse<T> {
    type Item = T;

    fn next_link(&self) -> Option<&str> {
        self.next_url()
    }

    fn into_values(self) -> Vec<T> {
        self.values
    }
}

/// Builds the first request URL of an iteration from pagination options.
pub type UrlFactory<'a> =
    Box<dyn Fn(&PaginationOptions) -> Result<Url, ApiError> + Send + Sync + 'a>;

/// Executes a request and decodes one page.
pub type PageFetcher<'a, P> = Box<dyn Fn(Url) -> BoxFuture<'a, Result<P, ApiError>> + Send + Sync + 'a>;

/// Iterator state: the URL of the page to fetch next. The first URL is built
/// eagerly but its error is only reported when the stream is first polled.
type Cursor = Option<Result<Url, ApiError>>;

/// A paginated listing that can be consumed page by page or item by item.
///
/// Built from two functions: one that creates the first request URL from
/// [`PaginationOptions`], and one that fetches and decodes a page. Nothing is
/// requested until a stream returned by this type is polled.
///
/// # Example
///
/// ```rust
/// use bitbucket_scaffolder::api::common::{
///     ApiError, PaginatedResponse, PaginationOptions, WithPagination,
/// };
/// use futures::TryStreamExt;
/// use url::Url;
///
/// # #[tokio::main]
/// # async fn main() {
/// let listing = WithPagination::new(
///     |options: &PaginationOptions| {
///         Url::parse(&format!("https://example.com/items?page={}", options.page.unwrap_or(1)))
///             .map_err(ApiError::from)
///     },
///     |url: Url| async move {
///         let last = url.query() == Some("page=2");
///         Ok::<_, ApiError>(PaginatedResponse {
///             values: vec![url.to_string()],
///             page: None,
///             pagelen: None,
///             size: None,
///             next: (!last).then(|| "https://example.com/items?page=2".to_string()),
///             previous: None,
///         })
///     },
/// );
///
/// let items: Vec<String> = listing
///     .iterate_results(&PaginationOptions::default())
///     .try_collect()
///     .await
///     .unwrap();
/// assert_eq!(items.len(), 2);
/// # }
/// ```
pub struct WithPagination<'a, P> {
    create_url: UrlFactory<'a>,
    fetch: PageFetcher<'a, P>,
}

impl<'a, P> WithPagination<'a, P>
where
    P: Paginated + Send + 'a,
{
    /// Creates a listing from a URL factory and a page fetcher.
    pub fn new<U, F, Fut>(create_url: U, fetch: F) -> Self
    where
        U: Fn(&PaginationOptions) -> Result<Url, ApiError> + Send + Sync + 'a,
        F: Fn(Url) -> Fut + Send + Sync + 'a,
        Fut: Future<Output = Result<P, ApiError>> + Send + 'a,
    {
        Self {
            create_url: Box::new(create_url),
            fetch: Box::new(move |url| fetch(url).boxed()),
        }
    }

    /// Fetches exactly one page built from `options`, without defaults.
    pub async fn get_page(&self, options: &PaginationOptions) -> Result<P, ApiError> {
        let url = (self.create_url)(options)?;
        (self.fetch)(url).await
    }

    /// Returns a lazy stream of whole pages.
    ///
    /// The first request uses `options` on top of page 1 /
    /// [`DEFAULT_PAGELEN`](super::DEFAULT_PAGELEN); every following request
    /// uses the previous page's `next` link.
    pub fn iterate_pages(
        &self,
        options: &PaginationOptions,
    ) -> BoxStream<'_, Result<P, ApiError>> {
        let first: Cursor = Some((self.create_url)(&options.with_defaults()));
        stream::try_unfold(first, move |cursor| fetch_next(&self.fetch, cursor)).boxed()
    }

    /// Returns a lazy stream of the items of every page, in server order.
    pub fn iterate_results(
        &self,
        options: &PaginationOptions,
    ) -> BoxStream<'_, Result<P::Item, ApiError>>
    where
        P::Item: Send,
    {
        self.iterate_pages(options)
            .map_ok(|page| stream::iter(page.into_values().into_iter().map(Ok::<P::Item, ApiError>)))
            .try_flatten()
            .boxed()
    }
}

async fn fetch_next<P: Paginated>(
    fetch: &PageFetcher<'_, P>,
    cursor: Cursor,
) -> Result<Option<(P, Cursor)>, ApiError> {
    let url = match cursor {
        Some(url) => url?,
        None => return Ok(None),
    };

    debug!(%url, "Fetching page");
    let page = fetch(url).await?;
    let next = match page.next_link() {
        Some(link) => Some(Ok(Url::parse(link)?)),
        None => None,
    };

    Ok(Some((page, next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_next_is_last_page() {
        let page: PaginatedResponse<u32> =
            serde_json::from_str(r#"{"values": [1, 2], "next": ""}"#).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_link(), None);
    }

    #[test]
    fn test_partial_response_without_values() {
        let page: PaginatedResponse<u32> = serde_json::from_str(r#"{"size": 0}"#).unwrap();
        assert!(page.values.is_empty());
        assert_eq!(page.into_values(), Vec::<u32>::new());
    }
}
