//! Itinerary aggregate models and DTOs.
//!
//! An itinerary owns an ordered list of days; each day owns an ordered list
//! of items. Day numbers and item orders are dense 1-based sequences assigned
//! at insertion time from array position.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voyago_core::timefmt::format_minutes;
use voyago_core::types::{DbId, Timestamp};

/// Scalar itinerary row from the `itineraries` table (no children).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItineraryRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    /// NULL decoded to empty at the read boundary.
    pub description: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full aggregate: itinerary with ordered days and their ordered items.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    #[serde(flatten)]
    pub record: ItineraryRecord,
    /// Whole days covered by the date range, inclusive of both endpoints.
    /// Derived from the dates, not from the number of day rows.
    pub days_count: i64,
    pub days: Vec<ItineraryDay>,
}

/// A day row with its ordered items.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDay {
    #[serde(flatten)]
    pub record: ItineraryDayRecord,
    pub items: Vec<ItineraryItem>,
}

/// Scalar day row from the `itinerary_days` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItineraryDayRecord {
    pub id: DbId,
    pub itinerary_id: DbId,
    pub day_number: i32,
    pub date: NaiveDate,
    pub note: String,
}

/// Item row as stored: times are integer minutes since midnight.
#[derive(Debug, Clone, FromRow)]
pub struct ItineraryItemRow {
    pub id: DbId,
    pub itinerary_day_id: DbId,
    #[sqlx(rename = "type")]
    pub item_type: String,
    pub ref_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Option<i32>,
    pub end_time: Option<i32>,
    pub duration: i32,
    pub item_order: i32,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// Item as exposed externally: times rendered as `"H:MM"`, absent optionals
/// decoded to zero-value/empty.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryItem {
    pub id: DbId,
    pub itinerary_day_id: DbId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub ref_id: DbId,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: i32,
    #[serde(rename = "order")]
    pub item_order: i32,
    pub location: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub notes: String,
}

impl From<ItineraryItemRow> for ItineraryItem {
    fn from(row: ItineraryItemRow) -> Self {
        ItineraryItem {
            id: row.id,
            itinerary_day_id: row.itinerary_day_id,
            item_type: row.item_type,
            ref_id: row.ref_id.unwrap_or_default(),
            title: row.title,
            description: row.description.unwrap_or_default(),
            start_time: row.start_time.map(format_minutes).unwrap_or_default(),
            end_time: row.end_time.map(format_minutes).unwrap_or_default(),
            duration: row.duration,
            item_order: row.item_order,
            location: row.location.unwrap_or_default(),
            latitude: row.latitude.unwrap_or_default(),
            longitude: row.longitude.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Write DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an itinerary, optionally with nested days and items.
///
/// Day numbers and item orders are NOT supplied by the caller; the repository
/// assigns dense 1-based sequences from array position.
#[derive(Debug, Clone)]
pub struct NewItinerary {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    pub days: Vec<NewItineraryDay>,
}

/// DTO for a day, standalone or nested inside [`NewItinerary`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItineraryDay {
    pub date: NaiveDate,
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<NewItineraryItem>,
}

/// DTO for an item. Times are `"H:MM"` clock strings, parsed to minute
/// offsets at the store boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItineraryItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub ref_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: i32,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// Scalar fields overwritten by an itinerary update.
#[derive(Debug, Clone)]
pub struct UpdateItinerary {
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
}

/// Scalar fields overwritten by a day update. Day numbers are append-only
/// and never renumbered.
#[derive(Debug, Clone)]
pub struct UpdateItineraryDay {
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_row_decoding_defaults() {
        let row = ItineraryItemRow {
            id: 1,
            itinerary_day_id: 2,
            item_type: "attraction".into(),
            ref_id: None,
            title: "Senso-ji".into(),
            description: None,
            start_time: Some(570),
            end_time: None,
            duration: 90,
            item_order: 1,
            location: None,
            latitude: None,
            longitude: None,
            notes: None,
        };

        let item = ItineraryItem::from(row);
        assert_eq!(item.start_time, "9:30");
        assert_eq!(item.end_time, "");
        assert_eq!(item.ref_id, 0);
        assert_eq!(item.description, "");
        assert_eq!(item.latitude, 0.0);
    }
}
