use heroes_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the read-only `all_entities` view.
///
/// `id` is only unique together with `entity_type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AllEntity {
    pub entity_type: String,
    pub id: DbId,
    pub name: String,
}
