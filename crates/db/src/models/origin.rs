//! Origin model, the per-origin count projection, and DTOs.

use heroes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `origins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Origin {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An origin annotated with the number of distinct heroes and villains
/// that reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OriginWithCounts {
    pub id: DbId,
    pub name: String,
    pub hero_count: i64,
    pub villain_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Origins can only be renamed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrigin {
    pub name: String,
}
