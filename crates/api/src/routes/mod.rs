pub mod categories;
pub mod entities;
pub mod health;
pub mod hero_proxy;
pub mod heroes;
pub mod origins;
pub mod villains;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/registry                                   registered entity admins (GET)
///
/// /admin/heroes                                     list, create
/// /admin/heroes/{id}                                get, update, delete
/// /admin/heroes/immortal                            make all immortal (POST, admin)
/// /admin/heroes/mortal                              make all mortal (POST, admin)
/// /admin/heroes/import-csv                          import (multipart, admin)
/// /admin/heroes/actions/mark-immortal               mark selected immortal (POST)
/// /admin/heroes/actions/export-csv                  export selected (POST)
///
/// /admin/hero-proxies                               list (read-only)
/// /admin/hero-proxies/{id}                          get (read-only)
///
/// /admin/villains                                   list, create
/// /admin/villains/{id}                              get, update, delete
/// /admin/villains/{id}/make-unique                  deduplicate by name (POST, admin)
/// /admin/villains/actions/export-csv                export selected (POST)
///
/// /admin/categories                                 list
/// /admin/categories/choices                         labelled choices
/// /admin/categories/{id}                            get (with villains), rename
///
/// /admin/origins                                    list with counts (?ordering=)
/// /admin/origins/{id}                               get with counts, rename
///
/// /admin/entities                                   consolidated list (read-only)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/registry", get(handlers::registry::list_models))
        .nest("/heroes", heroes::router())
        .nest("/hero-proxies", hero_proxy::router())
        .nest("/villains", villains::router())
        .nest("/categories", categories::router())
        .nest("/origins", origins::router())
        .nest("/entities", entities::router());

    Router::new().nest("/admin", admin)
}
