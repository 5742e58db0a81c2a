use axum::routing::get;
use axum::Router;

use crate::handlers::entities;
use crate::state::AppState;

/// Consolidated entity list, mounted at `/admin/entities`.
///
/// ```text
/// GET /   -> list_entities
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(entities::list_entities))
}
