//! Repository for the `origins` table and its hero/villain counts.

use heroes_core::ordering::OriginOrdering;
use heroes_core::types::DbId;
use sqlx::PgPool;

use crate::models::origin::{Origin, OriginWithCounts, UpdateOrigin};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Grouped count query. The joins fan out (heroes x villains per origin),
/// hence `COUNT(DISTINCT ...)`.
const COUNTS_SELECT: &str = "SELECT o.id, o.name,
            COUNT(DISTINCT h.id) AS hero_count,
            COUNT(DISTINCT v.id) AS villain_count,
            o.created_at, o.updated_at
     FROM origins o
     LEFT JOIN heroes h ON h.origin_id = o.id
     LEFT JOIN villains v ON v.origin_id = o.id";

pub struct OriginRepo;

impl OriginRepo {
    /// Insert an origin. The console never calls this; origins are
    /// provisioned by seed scripts and fixtures.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Origin, sqlx::Error> {
        let query = format!("INSERT INTO origins (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Origin>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// One page of origins with counts, computed in a single grouped query.
    pub async fn list_with_counts(
        pool: &PgPool,
        ordering: OriginOrdering,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OriginWithCounts>, sqlx::Error> {
        let query = format!(
            "{COUNTS_SELECT}
             GROUP BY o.id
             ORDER BY {}
             LIMIT $1 OFFSET $2",
            ordering.order_by_clause()
        );
        sqlx::query_as::<_, OriginWithCounts>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_with_counts(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OriginWithCounts>, sqlx::Error> {
        let query = format!("{COUNTS_SELECT} WHERE o.id = $1 GROUP BY o.id");
        sqlx::query_as::<_, OriginWithCounts>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Origins whose names appear in `names`, for resolving import rows.
    pub async fn find_by_names(pool: &PgPool, names: &[String]) -> Result<Vec<Origin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM origins WHERE name = ANY($1)");
        sqlx::query_as::<_, Origin>(&query)
            .bind(names)
            .fetch_all(pool)
            .await
    }

    /// Rename an origin. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrigin,
    ) -> Result<Option<Origin>, sqlx::Error> {
        let query = format!("UPDATE origins SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Origin>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }
}
