//
//  bitbucket-scaffolder
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud API
//!
//! REST client and models for the parts of the Bitbucket Cloud v2.0 API the
//! scaffolder uses.
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`client`] | [`BitbucketCloudClient`]: URL building, auth, request execution |
//! | [`cloud`] | Resource models (repositories, pipelines config, code search) |
//! | [`common`] | [`ApiError`], request options, URL builder, pagination |

/// Core HTTP client wrapper for Bitbucket Cloud.
///
/// Provides the [`BitbucketCloudClient`] struct which handles:
/// - Authentication header injection
/// - Request/response serialization
/// - Error mapping for non-success statuses
pub mod client;

/// Bitbucket Cloud API v2.0 models.
pub mod cloud;

/// Types shared by every endpoint.
///
/// Includes:
/// - [`ApiError`]: Error type for API operations
/// - [`RequestOptions`](common::RequestOptions): Query parameters
/// - [`WithPagination`](common::WithPagination): Lazy page streams
/// - [`Link`](common::Link): HATEOAS link type
pub mod common;

pub use client::BitbucketCloudClient;
pub use common::ApiError;
