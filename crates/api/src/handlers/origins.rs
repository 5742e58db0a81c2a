//! Handlers for the origin admin: counts per origin, sortable by either
//! count column.

use axum::extract::{Path, Query, State};
use axum::Json;
use heroes_core::error::CoreError;
use heroes_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use heroes_core::ordering::OriginOrdering;
use heroes_core::types::DbId;
use heroes_db::models::origin::{OriginWithCounts, UpdateOrigin};
use heroes_db::repositories::OriginRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::OriginListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Origin",
        id,
    })
}

/// GET /api/v1/admin/origins
///
/// `?ordering=` accepts `name`, `hero_count` or `villain_count`, with a `-`
/// prefix for descending order.
pub async fn list_origins(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<OriginListParams>,
) -> AppResult<Json<DataResponse<Vec<OriginWithCounts>>>> {
    let ordering = OriginOrdering::parse(params.ordering.as_deref())?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let origins = OriginRepo::list_with_counts(&state.pool, ordering, limit, offset).await?;
    Ok(Json(DataResponse { data: origins }))
}

/// GET /api/v1/admin/origins/{id}
pub async fn get_origin(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OriginWithCounts>>> {
    let origin = OriginRepo::find_with_counts(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: origin }))
}

/// PUT /api/v1/admin/origins/{id}
pub async fn update_origin(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateOrigin>,
) -> AppResult<Json<DataResponse<OriginWithCounts>>> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }

    OriginRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(origin_id = id, user_id = user.user_id, "Origin renamed");

    let origin = OriginRepo::find_with_counts(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: origin }))
}
