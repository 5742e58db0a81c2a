//! Route definitions for the hero admin, mounted at `/admin/heroes`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::heroes;
use crate::state::AppState;

/// ```text
/// GET    /                        -> list_heroes
/// POST   /                        -> create_hero
/// GET    /{id}                    -> get_hero
/// PUT    /{id}                    -> update_hero
/// DELETE /{id}                    -> delete_hero
/// POST   /immortal                -> make_all_immortal
/// POST   /mortal                  -> make_all_mortal
/// POST   /import-csv              -> import_csv
/// POST   /actions/mark-immortal   -> mark_immortal
/// POST   /actions/export-csv      -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(heroes::list_heroes).post(heroes::create_hero))
        .route("/immortal", post(heroes::make_all_immortal))
        .route("/mortal", post(heroes::make_all_mortal))
        .route("/import-csv", post(heroes::import_csv))
        .route("/actions/mark-immortal", post(heroes::mark_immortal))
        .route("/actions/export-csv", post(heroes::export_csv))
        .route(
            "/{id}",
            get(heroes::get_hero)
                .put(heroes::update_hero)
                .delete(heroes::delete_hero),
        )
}
