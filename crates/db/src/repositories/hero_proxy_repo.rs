//! Read-only access to heroes through the reduced proxy projection.

use heroes_core::types::DbId;
use sqlx::PgPool;

use crate::models::hero::HeroProxy;

const SELECT: &str = "SELECT h.id, h.name, h.is_immortal, c.name AS category, o.name AS origin
     FROM heroes h
     LEFT JOIN categories c ON c.id = h.category_id
     JOIN origins o ON o.id = h.origin_id";

pub struct HeroProxyRepo;

impl HeroProxyRepo {
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<HeroProxy>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY h.name ASC, h.id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, HeroProxy>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HeroProxy>, sqlx::Error> {
        let query = format!("{SELECT} WHERE h.id = $1");
        sqlx::query_as::<_, HeroProxy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
