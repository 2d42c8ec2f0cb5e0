//
//  labctl
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Query String Construction
//!
//! Resource operations describe their filters as an ordered list of
//! `key=value` pairs. Order is significant: the filters are emitted exactly as
//! they were inserted, so the same inputs always produce the same URL. Callers
//! build the list conditionally (only adding `archived=true` when the flag is
//! set, for example) and rely on that stable suffix.
//!
//! No percent-encoding is applied here. Values that may contain reserved
//! characters must be encoded by the caller before insertion.
//!
//! ## Example
//!
//! ```rust
//! use labctl::api::query::{build_query_string, QueryFilters};
//!
//! assert_eq!(build_query_string(&[("a", "1"), ("b", "2")]), "?a=1&b=2");
//! assert_eq!(build_query_string::<&str, &str>(&[]), "");
//!
//! let filters = QueryFilters::new()
//!     .with_if(true, "archived", "true")
//!     .with_opt("search", None::<&str>)
//!     .with("sort", "asc");
//! assert_eq!(filters.build(), "?archived=true&sort=asc");
//! ```

use std::fmt;

/// Joins ordered filters into a query suffix.
///
/// Returns `""` for an empty slice and `?k1=v1&k2=v2...` otherwise, keeping the
/// input order.
pub fn build_query_string<K, V>(filters: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if filters.is_empty() {
        return String::new();
    }

    let joined = filters
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&");

    format!("?{}", joined)
}

/// An ordered sequence of query filters.
///
/// Duplicate keys are kept; this is a sequence, not a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pairs: Vec<(String, String)>,
}

impl QueryFilters {
    /// Creates an empty filter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Appends a filter and returns the list, for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a filter only when `condition` holds.
    pub fn with_if(self, condition: bool, key: impl Into<String>, value: impl ToString) -> Self {
        if condition {
            self.with(key, value)
        } else {
            self
        }
    }

    /// Appends a filter only when `value` is `Some`.
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Appends every filter from `other`, after the existing ones.
    pub fn extend(mut self, other: QueryFilters) -> Self {
        self.pairs.extend(other.pairs);
        self
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when no filter has been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the query suffix. See [`build_query_string`].
    pub fn build(&self) -> String {
        build_query_string(&self.pairs)
    }
}

impl fmt::Display for QueryFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryFilters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
