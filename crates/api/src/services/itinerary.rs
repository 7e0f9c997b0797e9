//! Itinerary orchestration: validation, ownership checks, and ordering.
//!
//! Handlers stay thin; everything between the HTTP boundary and the
//! repositories lives here. The service owns three concerns:
//!
//! - field and item validation before anything touches the database;
//! - ownership enforcement for the itinerary and its nested days/items;
//! - dense append ordering (next day number / item order from the current
//!   count, never renumbering existing rows).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use voyago_core::error::CoreError;
use voyago_core::itinerary::{days_count, is_valid_item_type, validate_itinerary_fields};
use voyago_core::timefmt::{format_minutes, parse_clock};
use voyago_core::types::{DbId, Timestamp};
use voyago_db::models::itinerary::{
    Itinerary, ItineraryDayRecord, ItineraryItem, ItineraryRecord, NewItinerary, NewItineraryDay,
    NewItineraryItem, UpdateItinerary, UpdateItineraryDay,
};
use voyago_db::repositories::ItineraryRepo;

use crate::error::{AppError, AppResult};

/// Listing projection: itinerary header fields plus a derived day span.
///
/// Serialized into the cache as-is, so it must round-trip through JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItinerarySummary {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    /// Whole days covered by the date range, inclusive of both endpoints.
    pub days_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ItineraryRecord> for ItinerarySummary {
    fn from(record: ItineraryRecord) -> Self {
        let days_count = days_count(record.start_date, record.end_date);
        Self {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            destination: record.destination,
            start_date: record.start_date,
            end_date: record.end_date,
            is_public: record.is_public,
            days_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Orchestrates itinerary use cases over [`ItineraryRepo`].
pub struct ItineraryService;

impl ItineraryService {
    /// Validate and persist a new itinerary aggregate, returning it as stored.
    pub async fn create(pool: &PgPool, input: &NewItinerary) -> AppResult<Itinerary> {
        validate_itinerary_fields(
            &input.title,
            &input.destination,
            Some(input.start_date),
            Some(input.end_date),
        )
        .map_err(CoreError::Validation)?;
        for day in &input.days {
            for item in &day.items {
                validate_item(item)?;
            }
        }

        let id = ItineraryRepo::create(pool, input).await?;
        Self::get(pool, id).await
    }

    /// Fetch the full aggregate. Visibility (public vs. owner) is the
    /// caller's concern; this only distinguishes found from not found.
    pub async fn get(pool: &PgPool, id: DbId) -> AppResult<Itinerary> {
        ItineraryRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found("Itinerary", id))
    }

    /// Overwrite the itinerary's scalar fields. Days and items are untouched.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateItinerary,
    ) -> AppResult<Itinerary> {
        // Ownership first: a non-owner gets Forbidden regardless of what the
        // body contains.
        Self::load_owned(pool, id, user_id).await?;
        validate_itinerary_fields(
            &input.title,
            &input.destination,
            Some(input.start_date),
            Some(input.end_date),
        )
        .map_err(CoreError::Validation)?;

        if !ItineraryRepo::update(pool, id, input).await? {
            return Err(not_found("Itinerary", id));
        }
        Self::get(pool, id).await
    }

    /// Delete the whole aggregate (items, days, itinerary) in one transaction.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> AppResult<()> {
        Self::load_owned(pool, id, user_id).await?;
        if !ItineraryRepo::delete(pool, id).await? {
            return Err(not_found("Itinerary", id));
        }
        Ok(())
    }

    /// The authenticated user's itineraries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ItinerarySummary>> {
        let records = ItineraryRepo::list_by_user(pool, user_id, limit, offset).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Publicly shared itineraries, newest first.
    pub async fn list_public(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ItinerarySummary>> {
        let records = ItineraryRepo::list_public(pool, limit, offset).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    // -----------------------------------------------------------------------
    // Days
    // -----------------------------------------------------------------------

    /// Append a day to an owned itinerary; its number is the current day
    /// count plus one.
    pub async fn add_day(
        pool: &PgPool,
        user_id: DbId,
        itinerary_id: DbId,
        input: &NewItineraryDay,
    ) -> AppResult<ItineraryDayRecord> {
        Self::load_owned(pool, itinerary_id, user_id).await?;
        for item in &input.items {
            validate_item(item)?;
        }

        let next_number = ItineraryRepo::day_count(pool, itinerary_id).await? as i32 + 1;
        let day_id = ItineraryRepo::add_day(pool, itinerary_id, next_number, input).await?;
        ItineraryRepo::find_day_by_id(pool, day_id)
            .await?
            .ok_or_else(|| not_found("Itinerary day", day_id))
    }

    /// Overwrite a day's date and note. Its number never changes.
    pub async fn update_day(
        pool: &PgPool,
        user_id: DbId,
        day_id: DbId,
        input: &UpdateItineraryDay,
    ) -> AppResult<ItineraryDayRecord> {
        Self::check_day_owner(pool, day_id, user_id).await?;
        if !ItineraryRepo::update_day(pool, day_id, input).await? {
            return Err(not_found("Itinerary day", day_id));
        }
        ItineraryRepo::find_day_by_id(pool, day_id)
            .await?
            .ok_or_else(|| not_found("Itinerary day", day_id))
    }

    /// Remove a day and its items. Remaining day numbers keep their values,
    /// so the sequence may have gaps afterwards.
    pub async fn delete_day(pool: &PgPool, user_id: DbId, day_id: DbId) -> AppResult<()> {
        Self::check_day_owner(pool, day_id, user_id).await?;
        if !ItineraryRepo::delete_day(pool, day_id).await? {
            return Err(not_found("Itinerary day", day_id));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Append an item to a day; its order is the current item count plus one.
    pub async fn add_item(
        pool: &PgPool,
        user_id: DbId,
        day_id: DbId,
        input: &NewItineraryItem,
    ) -> AppResult<ItineraryItem> {
        Self::check_day_owner(pool, day_id, user_id).await?;
        validate_item(input)?;

        let next_order = ItineraryRepo::item_count(pool, day_id).await? as i32 + 1;
        let item_id = ItineraryRepo::add_item(pool, day_id, next_order, input).await?;
        Ok(stored_item(item_id, day_id, next_order, input))
    }

    /// Overwrite an item's fields. Its order never changes.
    pub async fn update_item(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
        input: &NewItineraryItem,
    ) -> AppResult<()> {
        Self::check_item_owner(pool, item_id, user_id).await?;
        validate_item(input)?;
        if !ItineraryRepo::update_item(pool, item_id, input).await? {
            return Err(not_found("Itinerary item", item_id));
        }
        Ok(())
    }

    /// Remove an item. Remaining item orders keep their values.
    pub async fn delete_item(pool: &PgPool, user_id: DbId, item_id: DbId) -> AppResult<()> {
        Self::check_item_owner(pool, item_id, user_id).await?;
        if !ItineraryRepo::delete_item(pool, item_id).await? {
            return Err(not_found("Itinerary item", item_id));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    /// Fetch an itinerary the user must own. Not found and not owned are
    /// distinct outcomes (404 vs. 403).
    pub async fn load_owned(pool: &PgPool, id: DbId, user_id: DbId) -> AppResult<Itinerary> {
        let itinerary = ItineraryRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found("Itinerary", id))?;
        if itinerary.record.user_id != user_id {
            return Err(forbidden());
        }
        Ok(itinerary)
    }

    async fn check_day_owner(pool: &PgPool, day_id: DbId, user_id: DbId) -> AppResult<()> {
        let (_, owner) = ItineraryRepo::find_owner_of_day(pool, day_id)
            .await?
            .ok_or_else(|| not_found("Itinerary day", day_id))?;
        if owner != user_id {
            return Err(forbidden());
        }
        Ok(())
    }

    async fn check_item_owner(pool: &PgPool, item_id: DbId, user_id: DbId) -> AppResult<()> {
        let (_, owner) = ItineraryRepo::find_owner_of_item(pool, item_id)
            .await?
            .ok_or_else(|| not_found("Itinerary item", item_id))?;
        if owner != user_id {
            return Err(forbidden());
        }
        Ok(())
    }
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "You do not have access to this itinerary".into(),
    ))
}

/// Validate a single item: known type, non-empty title, parseable times.
fn validate_item(item: &NewItineraryItem) -> AppResult<()> {
    if item.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Item title must not be empty".into(),
        )));
    }
    if !is_valid_item_type(&item.item_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid item type: {}",
            item.item_type
        ))));
    }
    for time in [&item.start_time, &item.end_time].into_iter().flatten() {
        if !time.is_empty() && parse_clock(time).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid time format: {time}. Expected H:MM"
            ))));
        }
    }
    Ok(())
}

/// Build the response shape for a freshly inserted item without a re-read.
/// Times are normalized the same way the read path renders them.
fn stored_item(id: DbId, day_id: DbId, order: i32, input: &NewItineraryItem) -> ItineraryItem {
    let render = |time: &Option<String>| {
        time.as_deref()
            .and_then(parse_clock)
            .map(format_minutes)
            .unwrap_or_default()
    };
    ItineraryItem {
        id,
        itinerary_day_id: day_id,
        item_type: input.item_type.clone(),
        ref_id: input.ref_id.unwrap_or_default(),
        title: input.title.clone(),
        description: input.description.clone().unwrap_or_default(),
        start_time: render(&input.start_time),
        end_time: render(&input.end_time),
        duration: input.duration,
        item_order: order,
        location: input.location.clone().unwrap_or_default(),
        latitude: input.latitude.unwrap_or_default(),
        longitude: input.longitude.unwrap_or_default(),
        notes: input.notes.clone().unwrap_or_default(),
    }
}
