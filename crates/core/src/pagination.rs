//! Page-number pagination and search-term helpers shared by list endpoints.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! layer and the API handlers agree on page sizes and response shape.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Page sizes
// ---------------------------------------------------------------------------

/// Antique catalog page size.
pub const ANTIQUE_PAGE_SIZE: i64 = 20;

/// Blog listing page size.
pub const BLOG_PAGE_SIZE: i64 = 12;

/// Wishlist listing page size.
pub const WISHLIST_PAGE_SIZE: i64 = 10;

/// Order history page size.
pub const ORDER_PAGE_SIZE: i64 = 20;

/// Upper bound for any caller-supplied page size.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// A resolved page request: 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a request from an optional `?page=` value and the resource's page size.
    ///
    /// Pages below 1 are treated as page 1. Pages whose offset would not fit
    /// in an `i64` are pulled back to the last representable page.
    pub fn new(page: Option<i64>, page_size: i64) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            page: page.unwrap_or(1).clamp(1, i64::MAX / page_size),
            page_size,
        }
    }

    /// Parse the page number from a raw query-string value.
    ///
    /// Unparseable values fall back to the first page.
    pub fn from_param(raw: Option<&str>, page_size: i64) -> Self {
        Self::new(raw.and_then(|p| p.trim().parse().ok()), page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results with enough metadata to render pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub num_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
            num_pages: num_pages(total_count, request.page_size),
        }
    }

    /// Transform the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            num_pages: self.num_pages,
        }
    }
}

/// Number of pages needed for `total` rows; an empty result still has one page.
pub fn num_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 1;
    }
    (total + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Search terms
// ---------------------------------------------------------------------------

/// Normalize a raw `?search=` value. Blank input means "no search".
pub fn normalize_search(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Build a case-insensitive `ILIKE` containment pattern.
///
/// `%`, `_` and `\` in the user input are escaped so they match literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
