//! Attraction catalog models and search parameters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voyago_core::types::{DbId, Timestamp};

/// Full attraction row from the `attractions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attraction {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub city: String,
    pub country: String,
    pub address: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub image_url: Option<String>,
    pub category: String,
    pub tags: sqlx::types::Json<Vec<String>>,
    pub open_hours: String,
    pub ticket_price: f64,
    pub duration: i32,
    pub rating: f64,
    pub popularity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reduced attraction projection for list/search results.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttractionListItem {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub city: String,
    pub country: String,
    pub address: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub image_url: Option<String>,
    pub category: String,
    pub rating: f64,
    pub duration: i32,
}

/// Attraction search filters; all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttractionSearch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
