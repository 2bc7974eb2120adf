//
//  bitbucket-scaffolder
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 types.
//!
//! Serialization types for the endpoints the scaffolder talks to, organized
//! by resource:
//!
//! - [`repositories`] - Repository listing and creation
//! - [`pipelines`] - Pipelines configuration (enable/disable)
//! - [`search`] - Workspace code search
//!
//! # Notes
//!
//! - All timestamps are in ISO 8601 format
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Pagination uses cursor-based navigation with `next` and `previous` links

pub mod pipelines;
pub mod repositories;
pub mod search;

pub use pipelines::{PipelinesConfig, UpdatePipelinesConfig};
pub use repositories::*;
pub use search::{SearchCodeSearchResult, SearchResultPage};
