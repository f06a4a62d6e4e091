//! Offset pagination.
//!
//! Every list endpoint accepts `page` and `limit`. Both default when absent
//! (or supplied empty) and must be integers greater than zero when present;
//! anything else is an [`ApiError::InvalidPagination`]. The SQL side is a
//! plain `LIMIT ? OFFSET ?` pair.

use serde::Serialize;

use crate::catalog::filters::FilterMap;
use crate::error::{ApiError, ApiResult};

/// Page used when the request names none.
pub const DEFAULT_PAGE: i64 = 1;
/// Rows per page used when the request names none.
pub const DEFAULT_LIMIT: i64 = 10;

/// A validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Pagination {
    /// Builds a pagination directly from known-good values.
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Reads `page` and `limit` from the request's filter map.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] when either value is present
    /// but not an integer greater than zero.
    pub fn from_filters(filters: &FilterMap) -> ApiResult<Self> {
        let page = parse_value(filters.get("page"), DEFAULT_PAGE)?;
        let limit = parse_value(filters.get("limit"), DEFAULT_LIMIT)?;

        Ok(Self { page, limit })
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_value(raw: Option<&str>, default: i64) -> ApiResult<i64> {
    match raw {
        None => Ok(default),
        Some(text) => text
            .parse::<i64>()
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(ApiError::InvalidPagination),
    }
}

/// JSON envelope for every list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// Page that was served
    pub page: i64,
    /// Requested page size
    pub limit: i64,
    /// Number of rows in `data` (at most `limit`)
    pub count: usize,
    /// The rows themselves
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wraps one page of rows.
    #[must_use]
    pub fn new(pagination: &Pagination, data: Vec<T>) -> Self {
        Self {
            page: pagination.page(),
            limit: pagination.limit(),
            count: data.len(),
            data,
        }
    }
}
