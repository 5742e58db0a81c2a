//! Read-only handlers for the hero proxy projection.

use axum::extract::{Path, Query, State};
use axum::Json;
use heroes_core::error::CoreError;
use heroes_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use heroes_core::types::DbId;
use heroes_db::models::hero::HeroProxy;
use heroes_db::repositories::HeroProxyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/hero-proxies
pub async fn list_hero_proxies(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<HeroProxy>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let proxies = HeroProxyRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: proxies }))
}

/// GET /api/v1/admin/hero-proxies/{id}
pub async fn get_hero_proxy(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<HeroProxy>>> {
    let proxy = HeroProxyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HeroProxy",
            id,
        }))?;
    Ok(Json(DataResponse { data: proxy }))
}
