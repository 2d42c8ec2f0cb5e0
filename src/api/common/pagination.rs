//
//  labctl
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Parameters
//!
//! List endpoints are paged with two query filters: `page` (1-indexed) and
//! `per_page` (capped by the server at [`MAX_PER_PAGE`]). Both are optional;
//! when omitted the server defaults apply (page 1, 20 items).
//!
//! # Example
//!
//! ```rust
//! use labctl::api::common::Pagination;
//! use labctl::api::query::QueryFilters;
//!
//! let filters = Pagination::new().page(2).per_page(50).apply(QueryFilters::new());
//! assert_eq!(filters.build(), "?page=2&per_page=50");
//! ```

use crate::api::query::QueryFilters;

/// Largest page size the server honours.
pub const MAX_PER_PAGE: u32 = 100;

/// Optional `page` / `per_page` filters for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Items per page, between 1 and [`MAX_PER_PAGE`].
    pub per_page: Option<u32>,
}

impl Pagination {
    /// No pagination filters; server defaults apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests page `page`. Page numbers below 1 are raised to 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Requests `per_page` items, clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.clamp(1, MAX_PER_PAGE));
        self
    }

    /// Returns `true` when neither filter is set.
    pub fn is_default(&self) -> bool {
        self.page.is_none() && self.per_page.is_none()
    }

    /// Appends `page` then `per_page` to `filters`, skipping unset values.
    pub fn apply(&self, filters: QueryFilters) -> QueryFilters {
        filters
            .with_opt("page", self.page)
            .with_opt("per_page", self.per_page)
    }
}
