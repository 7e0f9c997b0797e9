//! Itinerary field validation and derived values.

use chrono::NaiveDate;

/// Valid item type tags for itinerary items.
pub const ITEM_TYPES: &[&str] = &["attraction", "hotel", "transport", "meal", "activity", "other"];

/// Check whether an item type tag is recognised.
pub fn is_valid_item_type(item_type: &str) -> bool {
    ITEM_TYPES.contains(&item_type)
}

/// Validate the scalar fields shared by itinerary create and update.
///
/// Returns a message naming the violated field category.
pub fn validate_itinerary_fields(
    title: &str,
    destination: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".into());
    }
    if destination.trim().is_empty() {
        return Err("Destination must not be empty".into());
    }
    let (start, end) = match (start_date, end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err("Start and end dates are required".into()),
    };
    if end < start {
        return Err("End date must not be earlier than start date".into());
    }
    Ok(())
}

/// Validate an item title.
pub fn validate_item_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Item title must not be empty".into());
    }
    Ok(())
}

/// Whole days between start and end, inclusive.
pub fn days_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
