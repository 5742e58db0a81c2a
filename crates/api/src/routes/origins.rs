//! Route definitions for the origin admin, mounted at `/admin/origins`.
//!
//! There is no create or delete route; those methods answer 405.

use axum::routing::get;
use axum::Router;

use crate::handlers::origins;
use crate::state::AppState;

/// ```text
/// GET /       -> list_origins
/// GET /{id}   -> get_origin
/// PUT /{id}   -> update_origin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(origins::list_origins))
        .route(
            "/{id}",
            get(origins::get_origin).put(origins::update_origin),
        )
}
