//! Repository for the read-only `all_entities` view.

use sqlx::PgPool;

use crate::models::all_entity::AllEntity;

pub struct AllEntityRepo;

impl AllEntityRepo {
    /// List named entities of every type, grouped by type then name.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AllEntity>, sqlx::Error> {
        sqlx::query_as::<_, AllEntity>(
            "SELECT entity_type, id, name FROM all_entities
             ORDER BY entity_type ASC, name ASC, id ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
