//! Handlers for the `/attractions` catalog (read-only).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use voyago_core::error::CoreError;
use voyago_core::pagination::{clamp_page, clamp_page_size, page_offset};
use voyago_core::types::DbId;
use voyago_db::models::attraction::{Attraction, AttractionListItem, AttractionSearch};
use voyago_db::repositories::AttractionRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Query parameters for `GET /attractions/popular` (`?limit=`).
#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/attractions
///
/// Filtered search with pagination. All filters are optional; the default
/// sort is rating descending.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<AttractionSearch>,
) -> AppResult<Json<PageResponse<Attraction>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);
    let (rows, total) = AttractionRepo::search(&state.pool, &params).await?;
    Ok(Json(PageResponse {
        data: rows,
        total,
        page,
        limit,
    }))
}

/// GET /api/v1/attractions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Attraction>>> {
    let attraction = AttractionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Attraction",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: attraction }))
}

/// GET /api/v1/attractions/popular
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<DataResponse<Vec<AttractionListItem>>>> {
    let limit = clamp_page_size(params.limit);
    let rows = AttractionRepo::list_popular(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/attractions/category/{category}
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AttractionListItem>>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);
    let rows = AttractionRepo::list_by_category(
        &state.pool,
        &category,
        limit,
        page_offset(page, limit),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/attractions/country/{country}
pub async fn by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AttractionListItem>>>> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);
    let rows =
        AttractionRepo::list_by_country(&state.pool, &country, limit, page_offset(page, limit))
            .await?;
    Ok(Json(DataResponse { data: rows }))
}
