//! Repository for the `villains` table.

use heroes_core::types::DbId;
use sqlx::PgPool;

use crate::models::villain::{CreateVillain, MakeUniqueOutcome, UpdateVillain, Villain};

const SELECT: &str = "SELECT v.id, v.name,
            v.category_id, c.name AS category,
            v.origin_id, o.name AS origin,
            v.added_on, v.is_unique, v.created_at, v.updated_at
     FROM villains v
     LEFT JOIN categories c ON c.id = v.category_id
     JOIN origins o ON o.id = v.origin_id";

pub struct VillainRepo;

impl VillainRepo {
    pub async fn create(pool: &PgPool, input: &CreateVillain) -> Result<Villain, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO villains (name, category_id, origin_id, is_unique)
             VALUES ($1, $2, $3, COALESCE($4, FALSE))
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.category_id)
        .bind(input.origin_id)
        .bind(input.is_unique)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, Villain>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Villain>, sqlx::Error> {
        let query = format!("{SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, Villain>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Villains with the given ids, ordered by id. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Villain>, sqlx::Error> {
        let query = format!("{SELECT} WHERE v.id = ANY($1) ORDER BY v.id ASC");
        sqlx::query_as::<_, Villain>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Villain>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY v.name ASC, v.id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Villain>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All villains in a category, for the inline on the category view.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Villain>, sqlx::Error> {
        let query = format!("{SELECT} WHERE v.category_id = $1 ORDER BY v.name ASC, v.id ASC");
        sqlx::query_as::<_, Villain>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Count villains sharing `name`.
    pub async fn count_by_name(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM villains WHERE name = $1")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Update a villain. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVillain,
    ) -> Result<Option<Villain>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE villains SET
                name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                origin_id = COALESCE($4, origin_id),
                is_unique = COALESCE($5, is_unique)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.category_id)
        .bind(input.origin_id)
        .bind(input.is_unique)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Permanently delete a villain. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM villains WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every other villain with the same name and flag this one
    /// unique.
    ///
    /// Every row sharing the name is locked in id order before anything is
    /// deleted, so concurrent calls on the same name queue up instead of
    /// deadlocking. A call whose target was deleted by an earlier one
    /// returns `None`.
    pub async fn make_unique(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MakeUniqueOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let name: Option<String> = sqlx::query_scalar("SELECT name FROM villains WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(name) = name else {
            return Ok(None);
        };

        // Rows deleted or renamed while waiting are dropped from the result.
        let locked: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM villains WHERE name = $1 ORDER BY id FOR UPDATE",
        )
        .bind(&name)
        .fetch_all(&mut *tx)
        .await?;

        if !locked.contains(&id) {
            return Ok(None);
        }

        let deleted = sqlx::query("DELETE FROM villains WHERE name = $1 AND id <> $2")
            .bind(&name)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("UPDATE villains SET is_unique = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let query = format!("{SELECT} WHERE v.id = $1");
        let villain = sqlx::query_as::<_, Villain>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(MakeUniqueOutcome { villain, deleted }))
    }
}
