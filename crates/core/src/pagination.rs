//! Pagination defaults and clamping helpers.
//!
//! List endpoints accept `page` / `limit` query parameters; the clamps here
//! keep them inside sane bounds before they reach the repository layer.

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of results per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a 1-based page number; anything below 1 (or absent) becomes 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p >= 1 => p,
        _ => 1,
    }
}

/// Clamp a page size into `[1, MAX_PAGE_SIZE]`, defaulting to
/// [`DEFAULT_PAGE_SIZE`] when absent or non-positive.
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    match size {
        Some(s) if s >= 1 => s.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Row offset for a clamped page and page size.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}
