//! Handlers for the hero admin: list, change form, bulk immortality
//! toggles, row actions and CSV import.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heroes_core::benevolence::BenevolenceChoice;
use heroes_core::csv_import::parse_hero_csv;
use heroes_core::error::CoreError;
use heroes_core::listing::{clamp_limit, clamp_offset, DateDrilldown, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use heroes_core::registry::{ACTION_EXPORT_CSV, ACTION_MARK_IMMORTAL, ENTITY_HERO};
use heroes_core::types::DbId;
use heroes_db::models::hero::{
    Hero, HeroChild, HeroDetail, HeroFilter, HeroForm, HeroListItem, ImportHero,
};
use heroes_db::repositories::{HeroRepo, OriginRepo};
use heroes_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::export::csv_download;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::{HeroListParams, SelectionRequest};
use crate::response::{BulkActionResult, DataResponse};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
const CSV_FILE_FIELD: &str = "csv_file";

/// Result of a CSV import.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: u64,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_hero_exists(pool: &DbPool, id: DbId) -> AppResult<Hero> {
    HeroRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Hero",
            id,
        }))
}

async fn load_detail(pool: &DbPool, hero: Hero) -> AppResult<HeroDetail> {
    let children = HeroRepo::children_of(pool, &[hero.id]).await?;
    Ok(HeroDetail {
        is_very_benevolent: hero.is_very_benevolent(),
        hero,
        children,
    })
}

// ---------------------------------------------------------------------------
// List and change form
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/heroes
///
/// One page of heroes with the computed list columns, filtered by any of
/// `is_immortal`, `category_id`, `origin_id`, `is_very_benevolent` and the
/// `added_year` / `added_month` drill-down.
pub async fn list_heroes(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<HeroListParams>,
) -> AppResult<Json<DataResponse<Vec<HeroListItem>>>> {
    let benevolence = params
        .is_very_benevolent
        .as_deref()
        .map(BenevolenceChoice::parse)
        .transpose()?;
    let added = DateDrilldown {
        year: params.added_year,
        month: params.added_month,
    }
    .validate()?;

    let filter = HeroFilter {
        is_immortal: params.is_immortal,
        category_id: params.category_id,
        origin_id: params.origin_id,
        benevolence,
        added,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let heroes = HeroRepo::list(&state.pool, &filter, limit, offset).await?;
    let ids: Vec<DbId> = heroes.iter().map(|h| h.id).collect();
    let children = HeroRepo::children_of(&state.pool, &ids).await?;

    let mut by_parent: HashMap<DbId, Vec<&HeroChild>> = HashMap::new();
    for child in &children {
        by_parent.entry(child.parent_id).or_default().push(child);
    }

    let items = heroes
        .into_iter()
        .map(|hero| {
            let kids = by_parent.get(&hero.id).map(Vec::as_slice).unwrap_or(&[]);
            HeroListItem::new(hero, kids)
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/heroes/{id}
pub async fn get_hero(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<HeroDetail>>> {
    let hero = ensure_hero_exists(&state.pool, id).await?;
    let detail = load_detail(&state.pool, hero).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/admin/heroes
///
/// Resolves `category_name` to a category (creating it if needed) and
/// stamps `added_by` with the acting user.
pub async fn create_hero(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<HeroForm>,
) -> AppResult<(StatusCode, Json<DataResponse<HeroDetail>>)> {
    let form = input.clean()?;

    let hero = HeroRepo::create(&state.pool, &form, user.user_id).await?;

    tracing::info!(
        hero_id = hero.id,
        category_id = ?hero.category_id,
        user_id = user.user_id,
        "Hero created",
    );

    let detail = load_detail(&state.pool, hero).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/admin/heroes/{id}
///
/// `added_by` and `added_on` are never changed by an update.
pub async fn update_hero(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<HeroForm>,
) -> AppResult<Json<DataResponse<HeroDetail>>> {
    let form = input.clean()?;

    let hero = HeroRepo::update(&state.pool, id, &form)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Hero",
            id,
        }))?;

    tracing::info!(hero_id = id, user_id = user.user_id, "Hero updated");

    let detail = load_detail(&state.pool, hero).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/admin/heroes/{id}
pub async fn delete_hero(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HeroRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(hero_id = id, user_id = user.user_id, "Hero deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Hero",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Bulk immortality toggles
// ---------------------------------------------------------------------------

async fn set_all_immortal(
    state: &AppState,
    user_id: DbId,
    is_immortal: bool,
) -> AppResult<Json<DataResponse<BulkActionResult>>> {
    let updated = HeroRepo::set_all_immortal(&state.pool, is_immortal).await?;

    tracing::info!(updated, is_immortal, user_id, "All heroes updated");

    let message = if is_immortal {
        "All heroes are now immortal"
    } else {
        "All heroes are now mortal"
    };
    Ok(Json(DataResponse {
        data: BulkActionResult {
            updated,
            message: message.to_string(),
        },
    }))
}

/// POST /api/v1/admin/heroes/immortal
pub async fn make_all_immortal(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BulkActionResult>>> {
    set_all_immortal(&state, admin.user_id, true).await
}

/// POST /api/v1/admin/heroes/mortal
pub async fn make_all_mortal(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BulkActionResult>>> {
    set_all_immortal(&state, admin.user_id, false).await
}

// ---------------------------------------------------------------------------
// Row actions
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/heroes/actions/mark-immortal
///
/// Set `is_immortal = true` on the selected heroes.
pub async fn mark_immortal(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SelectionRequest>,
) -> AppResult<Json<DataResponse<BulkActionResult>>> {
    state.registry.ensure_action(ENTITY_HERO, ACTION_MARK_IMMORTAL)?;

    let updated = HeroRepo::mark_immortal(&state.pool, &input.ids).await?;

    tracing::info!(
        selected = input.ids.len(),
        updated,
        user_id = user.user_id,
        "Selected heroes marked immortal",
    );

    Ok(Json(DataResponse {
        data: BulkActionResult {
            updated,
            message: format!("{updated} hero(es) marked immortal"),
        },
    }))
}

/// POST /api/v1/admin/heroes/actions/export-csv
///
/// Stream the selected heroes as `hero.csv`. Unknown ids are skipped.
pub async fn export_csv(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SelectionRequest>,
) -> AppResult<Response> {
    state.registry.ensure_action(ENTITY_HERO, ACTION_EXPORT_CSV)?;

    let heroes = HeroRepo::find_by_ids(&state.pool, &input.ids).await?;

    tracing::info!(rows = heroes.len(), user_id = user.user_id, "Hero CSV export");

    Ok(csv_download(heroes).into_response())
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/heroes/import-csv
///
/// Accepts a multipart upload with a `csv_file` field in the export layout.
/// Origins are matched by name; categories are created on demand. Every
/// row is inserted in one transaction, so a failure imports nothing.
pub async fn import_csv(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportResult>>> {
    let mut data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(CSV_FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            data = Some(bytes);
        }
    }

    let data = data.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{CSV_FILE_FIELD}'"))
    })?;

    let rows = parse_hero_csv(&data)?;

    let mut origin_names: Vec<String> = rows.iter().map(|r| r.origin.clone()).collect();
    origin_names.sort();
    origin_names.dedup();
    let origins: HashMap<String, DbId> = OriginRepo::find_by_names(&state.pool, &origin_names)
        .await?
        .into_iter()
        .map(|o| (o.name, o.id))
        .collect();

    let heroes = rows
        .into_iter()
        .map(|row| {
            let origin_id = *origins.get(&row.origin).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Line {}: unknown origin '{}'",
                    row.line, row.origin
                ))
            })?;
            Ok(ImportHero {
                name: row.name,
                origin_id,
                category_name: row.category,
                is_immortal: row.is_immortal,
                benevolence_factor: row.benevolence_factor,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    let imported = HeroRepo::import(&state.pool, &heroes, admin.user_id).await?;

    tracing::info!(imported, user_id = admin.user_id, "Hero CSV imported");

    Ok(Json(DataResponse {
        data: ImportResult {
            imported,
            message: "Your csv file has been imported",
        },
    }))
}
