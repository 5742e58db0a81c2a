//! Route definitions for the read-only hero proxy, mounted at
//! `/admin/hero-proxies`.

use axum::routing::get;
use axum::Router;

use crate::handlers::hero_proxy;
use crate::state::AppState;

/// ```text
/// GET /       -> list_hero_proxies
/// GET /{id}   -> get_hero_proxy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hero_proxy::list_hero_proxies))
        .route("/{id}", get(hero_proxy::get_hero_proxy))
}
