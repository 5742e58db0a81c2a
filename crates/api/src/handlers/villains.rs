//! Handlers for the villain admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heroes_core::error::CoreError;
use heroes_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use heroes_core::registry::{ACTION_EXPORT_CSV, ENTITY_VILLAIN};
use heroes_core::types::DbId;
use heroes_db::models::villain::{CreateVillain, MakeUniqueOutcome, UpdateVillain, Villain};
use heroes_db::repositories::VillainRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::export::csv_download;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::{PaginationParams, SelectionRequest};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response of the make-unique action.
#[derive(Debug, Serialize)]
pub struct MakeUniqueResponse {
    #[serde(flatten)]
    pub outcome: MakeUniqueOutcome,
    pub message: &'static str,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Villain",
        id,
    })
}

/// GET /api/v1/admin/villains
pub async fn list_villains(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Villain>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let villains = VillainRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: villains }))
}

/// GET /api/v1/admin/villains/{id}
pub async fn get_villain(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Villain>>> {
    let villain = VillainRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: villain }))
}

/// POST /api/v1/admin/villains
pub async fn create_villain(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateVillain>,
) -> AppResult<(StatusCode, Json<DataResponse<Villain>>)> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }

    let villain = VillainRepo::create(&state.pool, &input).await?;

    tracing::info!(villain_id = villain.id, user_id = user.user_id, "Villain created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: villain })))
}

/// PUT /api/v1/admin/villains/{id}
///
/// `added_on` is read-only and ignored if sent.
pub async fn update_villain(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateVillain>,
) -> AppResult<Json<DataResponse<Villain>>> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "name must not be blank".to_string(),
            )));
        }
    }

    let villain = VillainRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(villain_id = id, user_id = user.user_id, "Villain updated");

    Ok(Json(DataResponse { data: villain }))
}

/// DELETE /api/v1/admin/villains/{id}
pub async fn delete_villain(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VillainRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(villain_id = id, user_id = user.user_id, "Villain deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/villains/{id}/make-unique
///
/// Delete every other villain with the same name and flag this one unique.
pub async fn make_unique(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MakeUniqueResponse>>> {
    let outcome = VillainRepo::make_unique(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        villain_id = id,
        name = %outcome.villain.name,
        deleted = outcome.deleted,
        user_id = admin.user_id,
        "Villain made unique",
    );

    Ok(Json(DataResponse {
        data: MakeUniqueResponse {
            outcome,
            message: "This villain is now unique",
        },
    }))
}

/// POST /api/v1/admin/villains/actions/export-csv
///
/// Stream the selected villains as `villain.csv`. Unknown ids are skipped.
pub async fn export_csv(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SelectionRequest>,
) -> AppResult<Response> {
    state
        .registry
        .ensure_action(ENTITY_VILLAIN, ACTION_EXPORT_CSV)?;

    let villains = VillainRepo::find_by_ids(&state.pool, &input.ids).await?;

    tracing::info!(rows = villains.len(), user_id = user.user_id, "Villain CSV export");

    Ok(csv_download(villains).into_response())
}
