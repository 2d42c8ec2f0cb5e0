//
//  labctl
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptors
//!
//! A [`RequestDescriptor`] describes one HTTP call before authentication and
//! URL resolution: method, API-relative path, ordered query filters, optional
//! JSON body and any extra headers. Building one never touches the network.
//!
//! Paths are relative to the API root. They never include the domain or the
//! `/api/v3` prefix; [`ApiGateway`](super::ApiGateway) adds both exactly once.
//!
//! ## Example
//!
//! ```rust
//! use labctl::api::request::{Method, RequestDescriptor};
//!
//! let request = RequestDescriptor::get("/projects")
//!     .filter("order_by", "name")
//!     .filter("sort", "asc");
//!
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(request.path_and_query(), "/projects?order_by=name&sort=asc");
//! ```

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use super::query::QueryFilters;

/// HTTP methods supported by the resource API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The method name in upper case, as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Immutable description of one pending API call.
///
/// Builder methods consume and return the descriptor; there are no setters on
/// a shared reference, so a descriptor handed to the gateway cannot change
/// underneath it.
///
/// # Fields
///
/// * `method` - HTTP method
/// * `path` - API-relative path, always starting with `/`
/// * `query` - Ordered query filters
/// * `body` - Optional JSON payload
/// * `headers` - Extra headers; the gateway's auth header always wins over these
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: QueryFilters,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl RequestDescriptor {
    /// Creates a descriptor for `method` and `path`.
    ///
    /// A path without a leading `/` gets one.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        Self {
            method,
            path,
            query: QueryFilters::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Shorthand for `RequestDescriptor::new(Method::Get, path)`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for `RequestDescriptor::new(Method::Post, path)`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Shorthand for `RequestDescriptor::new(Method::Put, path)`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Shorthand for `RequestDescriptor::new(Method::Delete, path)`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Replaces the query filters.
    pub fn query(mut self, filters: QueryFilters) -> Self {
        self.query = filters;
        self
    }

    /// Appends a single query filter after the existing ones.
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push(key, value);
        self
    }

    /// Sets the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Adds an extra header.
    ///
    /// The gateway applies these before its own authentication header, so a
    /// `PRIVATE-TOKEN` supplied here is replaced.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_filters(&self) -> &QueryFilters {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The relative path with the rendered query suffix appended.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query.build())
    }
}

impl fmt::Display for RequestDescriptor {
    /// Formats as `METHOD /path?query`, used to name the operation in errors
    /// and logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_slash_is_added() {
        assert_eq!(RequestDescriptor::get("projects").path(), "/projects");
        assert_eq!(RequestDescriptor::get("/projects").path(), "/projects");
    }

    #[test]
    fn test_constructors_set_method() {
        assert_eq!(RequestDescriptor::get("/x").method(), Method::Get);
        assert_eq!(RequestDescriptor::post("/x").method(), Method::Post);
        assert_eq!(RequestDescriptor::put("/x").method(), Method::Put);
        assert_eq!(RequestDescriptor::delete("/x").method(), Method::Delete);
        assert_eq!(
            RequestDescriptor::new(Method::Patch, "/x").method(),
            Method::Patch
        );
    }

    #[test]
    fn test_path_and_query_without_filters() {
        let request = RequestDescriptor::get("/projects/owned");
        assert_eq!(request.path_and_query(), "/projects/owned");
    }

    #[test]
    fn test_filters_append_in_order() {
        let request = RequestDescriptor::get("/projects")
            .query(QueryFilters::new().with("archived", true))
            .filter("page", 2);
        assert_eq!(request.path_and_query(), "/projects?archived=true&page=2");
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Body {
            name: String,
        }

        let request = RequestDescriptor::post("/projects")
            .json(&Body {
                name: "demo".to_string(),
            })
            .unwrap();
        assert_eq!(request.body(), Some(&serde_json::json!({"name": "demo"})));
        assert!(RequestDescriptor::get("/projects").body().is_none());
    }

    #[test]
    fn test_extra_headers_are_kept() {
        let request = RequestDescriptor::get("/projects").header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("abc"),
        );
        assert_eq!(request.headers().get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn test_display_names_the_operation() {
        let request = RequestDescriptor::delete("/projects/42");
        assert_eq!(request.to_string(), "DELETE /projects/42");
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
