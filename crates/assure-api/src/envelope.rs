//! # Response Envelope & Pagination
//!
//! Every successful response is wrapped in the dashboard envelope
//! `{ success: true, timestamp, version, data, pagination? }`. Listing
//! endpoints additionally validate `page` / `page_size` query parameters
//! and attach a [`PaginationMeta`] block.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use assure_core::Timestamp;

use crate::error::ApiError;

/// The API version string carried in every envelope.
pub const API_VERSION: &str = "v1";

/// Maximum admissible `page_size`.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default `page_size` when the query omits it.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Successful response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Always `true`.
    pub success: bool,
    /// When the response was produced.
    pub timestamp: Timestamp,
    /// API version string.
    pub version: String,
    /// The payload.
    pub data: T,
    /// Pagination metadata, present on listing endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> Envelope<T> {
    /// Wrap a payload without pagination.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            timestamp: Timestamp::now(),
            version: API_VERSION.to_string(),
            data,
            pagination: None,
        }
    }

    /// Wrap a payload with pagination metadata.
    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }
}

/// Pagination metadata on listing responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// 1-based page number.
    pub page: usize,
    /// Page size used for the slice.
    pub page_size: usize,
    /// Total items before slicing.
    pub total_items: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
}

/// Raw pagination query parameters.
///
/// `pageSize` is accepted as an alias because the dashboards send
/// camelCase query strings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number (default 1).
    pub page: Option<usize>,
    /// Items per page, 1–100 (default 20).
    #[serde(alias = "pageSize")]
    pub page_size: Option<usize>,
}

impl PageParams {
    /// Validate the parameters against the contract bounds.
    ///
    /// # Errors
    ///
    /// `page == 0` or `page_size` outside `1..=100` is a validation
    /// error (422).
    pub fn validate(&self) -> Result<(usize, usize), ApiError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::Validation("page must be >= 1".to_string()));
        }
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ApiError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok((page, page_size))
    }
}

/// Slice `items` to the requested page and build the metadata block.
///
/// A page past the end yields an empty slice rather than an error, so
/// clients can iterate until `data` is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, PaginationMeta) {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = (page - 1).saturating_mul(page_size);
    let slice = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    (
        slice,
        PaginationMeta {
            page,
            page_size,
            total_items,
            total_pages,
        },
    )
}
