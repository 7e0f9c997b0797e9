//! Attraction search constants and sort-key whitelisting.

/// Sort keys accepted by attraction search.
pub const SORT_KEYS: &[&str] = &["name", "rating", "popularity"];

/// Map a requested sort key onto a safe `ORDER BY` clause.
///
/// Unknown or absent keys fall back to the default ordering (rating DESC).
/// Only values from this function may be interpolated into SQL.
pub fn order_by_clause(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("name") => "name ASC",
        Some("popularity") => "popularity DESC",
        _ => "rating DESC",
    }
}
