//! Villain entity model and DTOs.

use heroes_core::csv_export::{text_bool, text_opt, text_timestamp, CsvRecord};
use heroes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A villain row joined with the display names of its foreign keys.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Villain {
    pub id: DbId,
    pub name: String,
    pub category_id: Option<DbId>,
    pub category: Option<String>,
    pub origin_id: DbId,
    pub origin: String,
    pub added_on: Timestamp,
    pub is_unique: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CsvRecord for Villain {
    const ENTITY: &'static str = "villain";
    const FIELDS: &'static [&'static str] =
        &["id", "name", "category", "origin", "added_on", "is_unique"];

    fn csv_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            text_opt(self.category.as_deref()),
            self.origin.clone(),
            text_timestamp(&self.added_on),
            text_bool(self.is_unique),
        ]
    }
}

/// DTO for creating a villain.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVillain {
    pub name: String,
    pub category_id: Option<DbId>,
    pub origin_id: DbId,
    pub is_unique: Option<bool>,
}

/// DTO for updating a villain. `added_on` is read-only and not accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVillain {
    pub name: Option<String>,
    pub category_id: Option<DbId>,
    pub origin_id: Option<DbId>,
    pub is_unique: Option<bool>,
}

/// Result of the deduplicate-by-name action.
#[derive(Debug, Clone, Serialize)]
pub struct MakeUniqueOutcome {
    pub villain: Villain,
    pub deleted: u64,
}
