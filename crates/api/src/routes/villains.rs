//! Route definitions for the villain admin, mounted at `/admin/villains`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::villains;
use crate::state::AppState;

/// ```text
/// GET    /                     -> list_villains
/// POST   /                     -> create_villain
/// GET    /{id}                 -> get_villain
/// PUT    /{id}                 -> update_villain
/// DELETE /{id}                 -> delete_villain
/// POST   /{id}/make-unique     -> make_unique
/// POST   /actions/export-csv   -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(villains::list_villains).post(villains::create_villain),
        )
        .route("/actions/export-csv", post(villains::export_csv))
        .route(
            "/{id}",
            get(villains::get_villain)
                .put(villains::update_villain)
                .delete(villains::delete_villain),
        )
        .route("/{id}/make-unique", post(villains::make_unique))
}
