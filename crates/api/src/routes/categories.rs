//! Route definitions for the category admin, mounted at `/admin/categories`.
//!
//! There is no create or delete route; those methods answer 405.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// GET /            -> list_categories
/// GET /choices     -> list_choices
/// GET /{id}        -> get_category
/// PUT /{id}        -> update_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list_categories))
        .route("/choices", get(categories::list_choices))
        .route(
            "/{id}",
            get(categories::get_category).put(categories::update_category),
        )
}
