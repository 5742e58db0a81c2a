//! Handlers for the category admin.
//!
//! Categories are a closed taxonomy here: they can be listed and renamed,
//! and only ever grow through hero saves.

use axum::extract::{Path, State};
use axum::Json;
use heroes_core::error::CoreError;
use heroes_core::types::DbId;
use heroes_db::models::category::{Category, CategoryChoice, UpdateCategory};
use heroes_db::models::villain::Villain;
use heroes_db::repositories::{CategoryRepo, VillainRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Category detail with its villains listed inline.
#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub villains: Vec<Villain>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/admin/categories
pub async fn list_categories(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/admin/categories/choices
///
/// Categories labelled `Category: <name>` for select widgets.
pub async fn list_choices(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryChoice>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    let choices = categories.iter().map(CategoryChoice::from).collect();
    Ok(Json(DataResponse { data: choices }))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CategoryDetail>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let villains = VillainRepo::list_by_category(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: CategoryDetail { category, villains },
    }))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Rename a category. A name already in use is a 409.
pub async fn update_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, user_id = user.user_id, "Category renamed");

    Ok(Json(DataResponse { data: category }))
}
