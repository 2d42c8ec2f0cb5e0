//
//  labctl
//  api/gateway.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Gateway
//!
//! Every call to the server goes through [`ApiGateway`]. Given a
//! [`RequestDescriptor`] it:
//!
//! 1. loads the current credentials from the [`ConfigStore`] (fresh on every call)
//! 2. copies the descriptor's extra headers, then sets `PRIVATE-TOKEN`
//! 3. resolves `<domain>/api/v3<path><query>`
//! 4. sends the request once, with no retries
//! 5. classifies the outcome and tags each decoded item
//!
//! ## Outcomes
//!
//! | Outcome | [`execute`](ApiGateway::execute) | [`execute_or_warn`](ApiGateway::execute_or_warn) |
//! |---------|-----------|-----------------|
//! | 2xx | `Ok(items)` in server order | `Ok(Lenient { items, warning: None })` |
//! | non-2xx | `Err(Error::Api(Status))` | warning logged, `Ok(Lenient { items: [], warning: Some(..) })` |
//! | transport failure | `Err(Error::Api(Transport))` | same as non-2xx |
//! | no credentials | `Err(Error::Config(NotConfigured))` | `Err(NotConfigured)` |
//!
//! The gateway keeps no state between calls besides the HTTP connection pool.
//!
//! ## Example
//!
//! ```rust,ignore
//! use labctl::api::{ApiGateway, RequestDescriptor};
//! use labctl::config::ConfigStore;
//!
//! let gateway = ApiGateway::new(ConfigStore::from_default_location()?)?;
//! let projects = gateway
//!     .execute::<serde_json::Value>(&RequestDescriptor::get("/projects"), "Project")
//!     .await?;
//! for project in &projects {
//!     println!("{} {}", project.type_name, project.item["name"]);
//! }
//! ```

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::common::{base_url, describe_error_body, status_code_hint, ApiError, Resource, Tagged};
use super::request::RequestDescriptor;
use crate::config::{ConfigError, ConfigStore, Credentials};
use crate::error::Error;

/// Version prefix inserted between the domain and every request path.
pub const API_PREFIX: &str = "/api/v3";

/// Header carrying the personal access token (`PRIVATE-TOKEN`).
pub const PRIVATE_TOKEN_HEADER: &str = "private-token";

/// Result of [`ApiGateway::execute_or_warn`].
///
/// An API failure does not abort the caller; it is returned in `warning`
/// alongside an empty `items`.
#[derive(Debug)]
pub struct Lenient<T> {
    /// Decoded items, empty when the call failed.
    pub items: Vec<Tagged<T>>,
    /// The failure, if any.
    pub warning: Option<ApiError>,
}

/// Authenticating dispatcher for every API call.
pub struct ApiGateway {
    /// The underlying HTTP client
    http: Client,
    /// Where credentials are read from before each call
    store: ConfigStore,
}

impl ApiGateway {
    /// Creates a gateway reading credentials from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised (for
    /// example when no TLS backend is available).
    pub fn new(store: ConfigStore) -> reqwest::Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("labctl/{}", crate::VERSION))
                .build()?,
            store,
        })
    }

    /// The store credentials are loaded from.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Dispatches `request` and tags every decoded item with `type_name`.
    ///
    /// A JSON array response yields one item per element, in the order the
    /// server returned them. A single object yields one item, and an empty
    /// body or `null` yields none.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] when credentials cannot be loaded; nothing is sent
    /// - [`Error::Api`] for transport failures, non-2xx responses and
    ///   undecodable bodies
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
        type_name: &str,
    ) -> Result<Vec<Tagged<T>>, Error> {
        let credentials = self.store.load()?;
        let headers = authenticated_headers(&credentials, request.headers())?;
        let url = resolve_url(credentials.domain(), request);
        let operation = request.to_string();
        let hint = status_code_hint(credentials.domain());

        tracing::debug!(method = %request.method(), url = %url, "Dispatching request");

        let mut builder = self.http.request(request.method().into(), &url).headers(headers);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            operation: operation.clone(),
            source,
            hint: hint.clone(),
        })?;
        let status = response.status();

        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(
                        status = %status,
                        error = %err,
                        "Could not read error response body"
                    );
                    String::new()
                }
            };
            return Err(ApiError::Status {
                operation,
                status,
                description: describe_error_body(status, &text),
                hint,
            }
            .into());
        }

        let text = response.text().await.map_err(|source| ApiError::Transport {
            operation: operation.clone(),
            source,
            hint,
        })?;

        let items = decode_items::<T>(&text)
            .map_err(|source| ApiError::Decode { operation, source })?;

        tracing::debug!(status = %status, count = items.len(), "Request succeeded");

        Ok(items
            .into_iter()
            .map(|item| Tagged::new(type_name, item))
            .collect())
    }

    /// Like [`execute`](Self::execute), but reports API failures as a warning.
    ///
    /// The failure is logged at `warn` level and returned in
    /// [`Lenient::warning`] with an empty item list. Configuration errors are
    /// still returned as errors: without credentials there is nothing to
    /// recover to.
    pub async fn execute_or_warn<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
        type_name: &str,
    ) -> Result<Lenient<T>, ConfigError> {
        match self.execute(request, type_name).await {
            Ok(items) => Ok(Lenient {
                items,
                warning: None,
            }),
            Err(Error::Api(err)) => {
                tracing::warn!("{}", err);
                Ok(Lenient {
                    items: Vec::new(),
                    warning: Some(err),
                })
            }
            Err(Error::Config(err)) => Err(err),
        }
    }

    /// [`execute`](Self::execute) tagged with `T::TYPE_NAME`.
    pub async fn fetch<T: Resource + DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Vec<Tagged<T>>, Error> {
        self.execute(request, T::TYPE_NAME).await
    }

    /// [`execute_or_warn`](Self::execute_or_warn) tagged with `T::TYPE_NAME`.
    pub async fn fetch_or_warn<T: Resource + DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Lenient<T>, ConfigError> {
        self.execute_or_warn(request, T::TYPE_NAME).await
    }
}

/// Composes the absolute URL for `request` against `domain`.
///
/// Only the scheme, host, port and path of `domain` are used; a saved query
/// string or fragment is dropped.
///
/// # Example
///
/// ```rust
/// use labctl::api::gateway::resolve_url;
/// use labctl::api::RequestDescriptor;
///
/// let request = RequestDescriptor::get("/projects").filter("search", "api");
/// assert_eq!(
///     resolve_url("https://gitlab.example.com/", &request),
///     "https://gitlab.example.com/api/v3/projects?search=api"
/// );
/// ```
pub fn resolve_url(domain: &str, request: &RequestDescriptor) -> String {
    format!("{}{}{}", base_url(domain), API_PREFIX, request.path_and_query())
}

/// Merges the caller's headers with the auth header.
///
/// The auth header is inserted last with `insert`, which drops any value the
/// caller supplied under the same name.
fn authenticated_headers(
    credentials: &Credentials,
    extra: &HeaderMap,
) -> Result<HeaderMap, ConfigError> {
    let mut headers = extra.clone();

    if headers.contains_key(PRIVATE_TOKEN_HEADER) {
        tracing::debug!("Ignoring caller-supplied PRIVATE-TOKEN header");
    }

    let mut token =
        HeaderValue::from_str(credentials.token()).map_err(|_| ConfigError::Validation {
            field: "token",
            reason: "token is not a valid header value".to_string(),
        })?;
    token.set_sensitive(true);
    headers.insert(PRIVATE_TOKEN_HEADER, token);

    Ok(headers)
}

fn decode_items<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<serde_json::Value>(body)? {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(values) => values
            .into_iter()
            .map(serde_json::from_value)
            .collect(),
        value => Ok(vec![serde_json::from_value(value)?]),
    }
}
