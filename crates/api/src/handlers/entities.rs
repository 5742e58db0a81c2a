//! Read-only handler for the consolidated entity list.

use axum::extract::{Query, State};
use axum::Json;
use heroes_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use heroes_db::models::all_entity::AllEntity;
use heroes_db::repositories::AllEntityRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/entities
///
/// Every category, origin, hero and villain as `(entity_type, id, name)`.
pub async fn list_entities(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AllEntity>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let rows = AllEntityRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}
