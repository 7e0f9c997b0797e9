//! Handlers for the `/itineraries` resource.
//!
//! Ownership and validation live in [`ItineraryService`]; handlers add the
//! HTTP-level concern of visibility (public vs. owner) and the public-page
//! cache.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use voyago_core::error::CoreError;
use voyago_core::pagination::{clamp_page, clamp_page_size, page_offset};
use voyago_core::types::DbId;
use voyago_db::models::itinerary::{
    Itinerary, ItineraryDayRecord, ItineraryItem, NewItinerary, NewItineraryDay, NewItineraryItem,
    UpdateItinerary, UpdateItineraryDay,
};

use crate::cache::{self, DEFAULT_TTL_SECS, PUBLIC_ITINERARIES_PREFIX};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::services::itinerary::{ItinerarySummary, ItineraryService};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /itineraries`. Days and items are optional; when
/// present they are numbered from array position.
#[derive(Debug, Deserialize)]
pub struct CreateItineraryRequest {
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub days: Vec<NewItineraryDay>,
}

/// Request body for `PUT /itineraries/{id}`. Whole-value overwrite of the
/// scalar fields; days and items have their own endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateItineraryRequest {
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_public: bool,
}

/// Request body for `PUT /itineraries/days/{day_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateDayRequest {
    pub date: NaiveDate,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Itinerary handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/itineraries
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateItineraryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Itinerary>>)> {
    let new_itinerary = NewItinerary {
        user_id: auth.user_id,
        title: input.title,
        description: input.description,
        destination: input.destination,
        start_date: input.start_date,
        end_date: input.end_date,
        is_public: input.is_public,
        days: input.days,
    };

    let itinerary = ItineraryService::create(&state.pool, &new_itinerary).await?;
    cache::invalidate_public_itineraries(&state.cache).await;

    tracing::info!(
        itinerary_id = itinerary.record.id,
        user_id = auth.user_id,
        "Itinerary created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: itinerary })))
}

/// GET /api/v1/itineraries/{id}
///
/// Public itineraries are visible to anyone authenticated; private ones
/// only to their owner.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Itinerary>>> {
    let itinerary = ItineraryService::get(&state.pool, id).await?;
    if !itinerary.record.is_public && itinerary.record.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this itinerary".into(),
        )));
    }
    Ok(Json(DataResponse { data: itinerary }))
}

/// PUT /api/v1/itineraries/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItineraryRequest>,
) -> AppResult<Json<DataResponse<Itinerary>>> {
    let update = UpdateItinerary {
        title: input.title,
        description: input.description,
        destination: input.destination,
        start_date: input.start_date,
        end_date: input.end_date,
        is_public: input.is_public,
    };

    let itinerary = ItineraryService::update(&state.pool, auth.user_id, id, &update).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok(Json(DataResponse { data: itinerary }))
}

/// DELETE /api/v1/itineraries/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ItineraryService::delete(&state.pool, auth.user_id, id).await?;
    cache::invalidate_public_itineraries(&state.cache).await;

    tracing::info!(itinerary_id = id, user_id = auth.user_id, "Itinerary deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/itineraries
///
/// The authenticated user's itineraries, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ItinerarySummary>>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);
    let summaries = ItineraryService::list_for_user(
        &state.pool,
        auth.user_id,
        limit,
        page_offset(page, limit),
    )
    .await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/itineraries/public
///
/// Publicly shared itineraries. Pages are served from the cache when
/// configured; a miss falls through to the database and repopulates it.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ItinerarySummary>>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);
    let key = format!("{PUBLIC_ITINERARIES_PREFIX}:{page}:{limit}");

    if let Some(cache) = &state.cache {
        if let Some(cached) = cache.get_json::<Vec<ItinerarySummary>>(&key).await {
            return Ok(Json(DataResponse { data: cached }));
        }
    }

    let summaries =
        ItineraryService::list_public(&state.pool, limit, page_offset(page, limit)).await?;

    if let Some(cache) = &state.cache {
        cache.set_json(&key, &summaries, DEFAULT_TTL_SECS).await;
    }
    Ok(Json(DataResponse { data: summaries }))
}

// ---------------------------------------------------------------------------
// Day handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/itineraries/{id}/days
pub async fn add_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<NewItineraryDay>,
) -> AppResult<(StatusCode, Json<DataResponse<ItineraryDayRecord>>)> {
    let day = ItineraryService::add_day(&state.pool, auth.user_id, id, &input).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: day })))
}

/// PUT /api/v1/itineraries/days/{day_id}
pub async fn update_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(day_id): Path<DbId>,
    Json(input): Json<UpdateDayRequest>,
) -> AppResult<Json<DataResponse<ItineraryDayRecord>>> {
    let update = UpdateItineraryDay {
        date: input.date,
        note: input.note,
    };
    let day = ItineraryService::update_day(&state.pool, auth.user_id, day_id, &update).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok(Json(DataResponse { data: day }))
}

/// DELETE /api/v1/itineraries/days/{day_id}
pub async fn delete_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(day_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ItineraryService::delete_day(&state.pool, auth.user_id, day_id).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Item handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/itineraries/days/{day_id}/items
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(day_id): Path<DbId>,
    Json(input): Json<NewItineraryItem>,
) -> AppResult<(StatusCode, Json<DataResponse<ItineraryItem>>)> {
    let item = ItineraryService::add_item(&state.pool, auth.user_id, day_id, &input).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/itineraries/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<DbId>,
    Json(input): Json<NewItineraryItem>,
) -> AppResult<StatusCode> {
    ItineraryService::update_item(&state.pool, auth.user_id, item_id, &input).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/itineraries/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ItineraryService::delete_item(&state.pool, auth.user_id, item_id).await?;
    cache::invalidate_public_itineraries(&state.cache).await;
    Ok(StatusCode::NO_CONTENT)
}
