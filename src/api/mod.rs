//
//  labctl
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! The request pipeline shared by every resource, plus the resource modules
//! built on top of it.
//!
//! ## Architecture
//!
//! - [`query`]: ordered query-string construction
//! - [`request`]: [`RequestDescriptor`], the unauthenticated description of a call
//! - [`gateway`]: [`ApiGateway`], which authenticates, dispatches and classifies
//! - [`common`]: [`ApiError`], [`Tagged`] results, pagination
//! - [`projects`], [`events`]: resource-specific request builders and payloads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labctl::api::{ApiGateway, projects::{self, Project}};
//! use labctl::config::ConfigStore;
//!
//! let gateway = ApiGateway::new(ConfigStore::from_default_location()?)?;
//! let request = projects::ListProjects::default().descriptor();
//! for project in gateway.fetch::<Project>(&request).await? {
//!     println!("{}: {}", project.type_name, project.item.name);
//! }
//! ```

/// Shared result, error and pagination types.
pub mod common;

/// Project activity events.
pub mod events;

/// Authenticating dispatcher.
pub mod gateway;

/// Project resources.
pub mod projects;

/// Ordered query filters.
pub mod query;

/// Request descriptors.
pub mod request;

pub use common::{ApiError, Pagination, Resource, Tagged};
pub use gateway::{ApiGateway, Lenient, API_PREFIX};
pub use query::{build_query_string, QueryFilters};
pub use request::{Method, RequestDescriptor};
