//
//  labctl
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types used by the gateway and every resource module.
//!
//! # Overview
//!
//! - [`ApiError`] - Classified failure of a dispatched request
//! - [`Tagged`] - A decoded payload carried beside its logical type name
//! - [`Resource`] - Ties a payload type to the tag it is reported under
//! - [`Pagination`] - `page` / `per_page` filters (from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use labctl::api::common::Tagged;
//!
//! let tagged = Tagged::new("Project", serde_json::json!({"id": 1}));
//! assert_eq!(tagged.type_name, "Project");
//! assert_eq!(
//!     serde_json::to_value(&tagged).unwrap(),
//!     serde_json::json!({"type": "Project", "id": 1})
//! );
//! ```

use reqwest::StatusCode;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Classified failure of a dispatched API request.
///
/// Every variant names the operation (`GET /projects?search=x`) so the message
/// is diagnosable without reading the source. Status and transport failures
/// also carry a hint pointing at the server's status-code documentation.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Status` | The server answered with a non-2xx status |
/// | `Transport` | The request never produced a response (DNS, TLS, refused, ...) |
/// | `Decode` | A 2xx response body did not match the expected shape |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request.
    #[error("{operation} failed with {status}: {description}. {hint}")]
    Status {
        /// Method and relative path of the request.
        operation: String,
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Message extracted from the error body, or the canonical reason.
        description: String,
        /// Pointer to the status-code documentation.
        hint: String,
    },

    /// The request could not be completed.
    #[error("{operation} failed: {source}. {hint}")]
    Transport {
        /// Method and relative path of the request.
        operation: String,
        /// The underlying transport error.
        source: reqwest::Error,
        /// Pointer to the status-code documentation.
        hint: String,
    },

    /// The response body could not be decoded.
    #[error("{operation} returned an unexpected response body: {source}")]
    Decode {
        /// Method and relative path of the request.
        operation: String,
        /// The JSON decoding error.
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The HTTP status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::Decode { .. } => None,
        }
    }

    /// The operation that failed, e.g. `GET /projects`.
    pub fn operation(&self) -> &str {
        match self {
            Self::Status { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }

    /// The documentation hint, if this failure carries one.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Status { hint, .. } | Self::Transport { hint, .. } => Some(hint),
            Self::Decode { .. } => None,
        }
    }
}

/// Builds the hint attached to status and transport failures.
///
/// # Example
///
/// ```rust
/// use labctl::api::common::status_code_hint;
///
/// assert_eq!(
///     status_code_hint("https://gitlab.example.com/"),
///     "See https://gitlab.example.com/help/api/README.md#status-codes for more information"
/// );
/// ```
pub fn status_code_hint(domain: &str) -> String {
    format!(
        "See {}/help/api/README.md#status-codes for more information",
        base_url(domain)
    )
}

/// The scheme, host, port and path of `domain`, without a trailing `/`.
///
/// Any query string or fragment saved with the domain is dropped so that
/// paths can be appended to the result.
///
/// # Example
///
/// ```rust
/// use labctl::api::common::base_url;
///
/// assert_eq!(base_url("https://gitlab.example.com/"), "https://gitlab.example.com");
/// assert_eq!(
///     base_url("http://localhost:8080/gitlab/?x=1#top"),
///     "http://localhost:8080/gitlab"
/// );
/// ```
pub fn base_url(domain: &str) -> String {
    match url::Url::parse(domain) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.as_str().trim_end_matches('/').to_string()
        }
        Err(_) => domain
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(domain)
            .trim_end_matches('/')
            .to_string(),
    }
}

/// Extracts a readable description from an error response body.
///
/// The API reports errors in a few shapes:
///
/// ```json
/// {"message": "401 Unauthorized"}
/// {"message": {"name": ["has already been taken"]}}
/// {"error": "insufficient_scope", "error_description": "The request requires higher privileges"}
/// ```
///
/// Unknown JSON shapes and non-JSON bodies fall back to the raw body, and an
/// empty body falls back to the status' canonical reason.
pub fn describe_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        match json.get("message") {
            Some(serde_json::Value::String(message)) => return message.clone(),
            // Validation errors: {"field": ["problem", ...], ...}
            Some(serde_json::Value::Object(fields)) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(field, problems)| match problems.as_array() {
                        Some(list) => {
                            let list: Vec<&str> =
                                list.iter().filter_map(|p| p.as_str()).collect();
                            format!("{} {}", field, list.join(", "))
                        }
                        None => format!("{}: {}", field, problems),
                    })
                    .collect();
                if !parts.is_empty() {
                    return parts.join("; ");
                }
            }
            _ => {}
        }

        if let Some(description) = json.get("error_description").and_then(|d| d.as_str()) {
            return description.to_string();
        }

        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return error.to_string();
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("no description")
        .to_string()
}

/// A decoded payload paired with the logical type name it was requested as.
///
/// The tag is a plain string chosen by the caller, so heterogeneous results
/// can be told apart downstream without re-parsing. When serialized, an
/// object payload gets the tag as a leading `"type"` field next to its own
/// fields. Any other payload (an array, a number, `true`) is wrapped as
/// `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    /// Logical type name, e.g. `"Project"`.
    pub type_name: String,

    /// The decoded payload.
    pub item: T,
}

impl<T: Serialize> Serialize for Tagged<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flat<'a, T> {
            #[serde(rename = "type")]
            type_name: &'a str,
            #[serde(flatten)]
            item: &'a T,
        }

        #[derive(Serialize)]
        struct Wrapped<'a> {
            #[serde(rename = "type")]
            type_name: &'a str,
            value: serde_json::Value,
        }

        let value = serde_json::to_value(&self.item).map_err(S::Error::custom)?;
        if value.is_object() {
            Flat {
                type_name: &self.type_name,
                item: &self.item,
            }
            .serialize(serializer)
        } else {
            Wrapped {
                type_name: &self.type_name,
                value,
            }
            .serialize(serializer)
        }
    }
}

impl<T> Tagged<T> {
    /// Pairs `item` with `type_name`.
    pub fn new(type_name: impl Into<String>, item: T) -> Self {
        Self {
            type_name: type_name.into(),
            item,
        }
    }

    /// Discards the tag.
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// A payload type with a fixed logical type name.
///
/// Lets callers dispatch with [`ApiGateway::fetch`](super::ApiGateway::fetch)
/// instead of spelling out the tag each time.
pub trait Resource {
    /// The tag attached to every decoded item of this type.
    const TYPE_NAME: &'static str;
}

impl Resource for serde_json::Value {
    const TYPE_NAME: &'static str = "Object";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_plain_message() {
        let body = r#"{"message": "401 Unauthorized"}"#;
        assert_eq!(
            describe_error_body(StatusCode::UNAUTHORIZED, body),
            "401 Unauthorized"
        );
    }

    #[test]
    fn test_describe_validation_message() {
        let body = r#"{"message": {"name": ["has already been taken"], "path": ["is too short", "is invalid"]}}"#;
        assert_eq!(
            describe_error_body(StatusCode::BAD_REQUEST, body),
            "name has already been taken; path is too short, is invalid"
        );
    }

    #[test]
    fn test_describe_oauth_style_error() {
        let body = r#"{"error": "insufficient_scope", "error_description": "needs api scope"}"#;
        assert_eq!(
            describe_error_body(StatusCode::FORBIDDEN, body),
            "needs api scope"
        );

        let body = r#"{"error": "404 Not Found"}"#;
        assert_eq!(describe_error_body(StatusCode::NOT_FOUND, body), "404 Not Found");
    }

    #[test]
    fn test_describe_falls_back_to_body_then_reason() {
        assert_eq!(
            describe_error_body(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            describe_error_body(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_base_url_drops_query_and_fragment() {
        assert_eq!(base_url("https://gitlab.example.com"), "https://gitlab.example.com");
        assert_eq!(base_url("https://gitlab.example.com/?x=1"), "https://gitlab.example.com");
        assert_eq!(base_url("https://host:8443/git/#frag"), "https://host:8443/git");
        assert_eq!(
            status_code_hint("https://gitlab.example.com/?x=1"),
            "See https://gitlab.example.com/help/api/README.md#status-codes for more information"
        );
    }

    #[test]
    fn test_status_error_message_has_context() {
        let err = ApiError::Status {
            operation: "GET /projects".to_string(),
            status: StatusCode::UNAUTHORIZED,
            description: "401 Unauthorized".to_string(),
            hint: status_code_hint("https://gitlab.example.com"),
        };
        let message = err.to_string();

        assert!(message.starts_with("GET /projects failed with 401 Unauthorized"));
        assert!(message.contains("https://gitlab.example.com/help/api/README.md#status-codes"));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.operation(), "GET /projects");
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_tagged_serializes_type_first() {
        #[derive(Serialize)]
        struct Item {
            id: u64,
            name: &'static str,
        }

        let tagged = Tagged::new("Project", Item { id: 3, name: "demo" });
        let json = serde_json::to_string(&tagged).unwrap();
        assert_eq!(json, r#"{"type":"Project","id":3,"name":"demo"}"#);
        assert_eq!(tagged.into_inner().id, 3);
    }

    #[test]
    fn test_tagged_wraps_non_object_payloads() {
        let tagged = Tagged::new("Object", serde_json::json!([1, 2]));
        assert_eq!(
            serde_json::to_string(&tagged).unwrap(),
            r#"{"type":"Object","value":[1,2]}"#
        );

        let tagged = Tagged::new("Object", serde_json::Value::Bool(true));
        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            serde_json::json!({"type": "Object", "value": true})
        );
    }
}
