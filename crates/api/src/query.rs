//! Shared query parameter and request body types for API handlers.

use heroes_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the hero list.
#[derive(Debug, Deserialize)]
pub struct HeroListParams {
    pub is_immortal: Option<bool>,
    pub category_id: Option<DbId>,
    pub origin_id: Option<DbId>,
    /// `Yes` or `No`.
    pub is_very_benevolent: Option<String>,
    pub added_year: Option<i32>,
    pub added_month: Option<u32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the origin list.
#[derive(Debug, Deserialize)]
pub struct OriginListParams {
    /// `name`, `hero_count` or `villain_count`, optionally prefixed with `-`.
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of a row action: the selected record ids.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub ids: Vec<DbId>,
}
