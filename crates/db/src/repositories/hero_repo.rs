//! Repository for the `heroes` table and its `hero_children` links.

use heroes_core::error::CoreError;
use heroes_core::lineage;
use heroes_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::hero::{Hero, HeroChild, HeroFilter, HeroForm, ImportHero};
use crate::repositories::CategoryRepo;

/// Hero columns joined with the display names of their foreign keys.
const SELECT: &str = "SELECT h.id, h.name, h.is_immortal,
            h.category_id, c.name AS category,
            h.origin_id, o.name AS origin,
            h.benevolence_factor, h.added_on,
            h.added_by, u.username AS added_by_username,
            h.headshot, h.created_at, h.updated_at
     FROM heroes h
     LEFT JOIN categories c ON c.id = h.category_id
     JOIN origins o ON o.id = h.origin_id
     LEFT JOIN users u ON u.id = h.added_by";

/// Advisory lock key held while a save rewrites `hero_children`, so cycle
/// checks and child writes from concurrent saves never interleave.
const LINEAGE_LOCK_KEY: i64 = 0x4845_524f_4c49_4e45;

/// Why a hero save was refused.
#[derive(Debug, thiserror::Error)]
pub enum HeroSaveError {
    /// The child set is invalid (unknown ids or a cycle).
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub struct HeroRepo;

impl HeroRepo {
    /// Insert a hero from the change form.
    ///
    /// The category is resolved by name, the hero inserted with `added_by`
    /// stamped, and the child set written, all in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &HeroForm,
        added_by: DbId,
    ) -> Result<Hero, HeroSaveError> {
        let mut tx = pool.begin().await?;

        let category = CategoryRepo::get_or_create(&mut tx, &input.category_name).await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO heroes
                (name, is_immortal, category_id, origin_id, benevolence_factor, headshot, added_by)
             VALUES ($1, COALESCE($2, TRUE), $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.is_immortal)
        .bind(category.id)
        .bind(input.origin_id)
        .bind(input.benevolence_factor)
        .bind(&input.headshot)
        .bind(added_by)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(children) = &input.children {
            Self::replace_children(&mut tx, id, children).await?;
        }

        let hero = Self::fetch_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(hero)
    }

    /// Update a hero from the change form. `added_by` and `added_on` are
    /// never written.
    ///
    /// Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &HeroForm,
    ) -> Result<Option<Hero>, HeroSaveError> {
        let mut tx = pool.begin().await?;

        let category = CategoryRepo::get_or_create(&mut tx, &input.category_name).await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE heroes SET
                name = $2,
                is_immortal = COALESCE($3, is_immortal),
                category_id = $4,
                origin_id = $5,
                benevolence_factor = $6,
                headshot = COALESCE($7, headshot)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.is_immortal)
        .bind(category.id)
        .bind(input.origin_id)
        .bind(input.benevolence_factor)
        .bind(&input.headshot)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` rolls back the category insert.
        if updated.is_none() {
            return Ok(None);
        }

        if let Some(children) = &input.children {
            Self::replace_children(&mut tx, id, children).await?;
        }

        let hero = Self::fetch_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(hero))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("{SELECT} WHERE h.id = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Heroes with the given ids, ordered by id. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("{SELECT} WHERE h.id = ANY($1) ORDER BY h.id ASC");
        sqlx::query_as::<_, Hero>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// One page of heroes matching `filter`, ordered by name.
    pub async fn list(
        pool: &PgPool,
        filter: &HeroFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Hero>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.is_immortal.is_some() {
            conditions.push(format!("h.is_immortal = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category_id.is_some() {
            conditions.push(format!("h.category_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.origin_id.is_some() {
            conditions.push(format!("h.origin_id = ${param_idx}"));
            param_idx += 1;
        }
        if let Some(choice) = filter.benevolence {
            // Fixed predicate text, no bind parameter.
            conditions.push(choice.sql_predicate("h.benevolence_factor"));
        }
        if filter.added.year.is_some() {
            conditions.push(format!(
                "EXTRACT(YEAR FROM h.added_on AT TIME ZONE 'UTC')::INT = ${param_idx}"
            ));
            param_idx += 1;
        }
        if filter.added.month.is_some() {
            conditions.push(format!(
                "EXTRACT(MONTH FROM h.added_on AT TIME ZONE 'UTC')::INT = ${param_idx}"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "{SELECT} {where_clause}
             ORDER BY h.name ASC, h.id ASC
             LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Hero>(&query);
        if let Some(is_immortal) = filter.is_immortal {
            q = q.bind(is_immortal);
        }
        if let Some(category_id) = filter.category_id {
            q = q.bind(category_id);
        }
        if let Some(origin_id) = filter.origin_id {
            q = q.bind(origin_id);
        }
        if let Some(year) = filter.added.year {
            q = q.bind(year);
        }
        if let Some(month) = filter.added.month {
            q = q.bind(month as i32);
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Total number of heroes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(pool)
            .await
    }

    /// Permanently delete a hero. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `is_immortal` on every hero. Returns the number of rows touched.
    pub async fn set_all_immortal(pool: &PgPool, is_immortal: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE heroes SET is_immortal = $1")
            .bind(is_immortal)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Mark the selected heroes immortal. Unknown ids are ignored.
    pub async fn mark_immortal(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE heroes SET is_immortal = TRUE WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert imported heroes in a single transaction. Either every row is
    /// written or none is.
    pub async fn import(
        pool: &PgPool,
        rows: &[ImportHero],
        added_by: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut imported = 0u64;

        for row in rows {
            let category_id = match &row.category_name {
                Some(name) => Some(CategoryRepo::get_or_create(&mut tx, name).await?.id),
                None => None,
            };

            sqlx::query(
                "INSERT INTO heroes
                    (name, is_immortal, category_id, origin_id, benevolence_factor, added_by)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&row.name)
            .bind(row.is_immortal)
            .bind(category_id)
            .bind(row.origin_id)
            .bind(row.benevolence_factor)
            .bind(added_by)
            .execute(&mut *tx)
            .await?;
            imported += 1;
        }

        tx.commit().await?;
        Ok(imported)
    }

    // -----------------------------------------------------------------------
    // Children
    // -----------------------------------------------------------------------

    /// Children of every hero in `parent_ids`, in one query.
    pub async fn children_of(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<Vec<HeroChild>, sqlx::Error> {
        sqlx::query_as::<_, HeroChild>(
            "SELECT hc.parent_id, h.id, h.name
             FROM hero_children hc
             JOIN heroes h ON h.id = hc.child_id
             WHERE hc.parent_id = ANY($1)
             ORDER BY hc.parent_id ASC, h.name ASC, h.id ASC",
        )
        .bind(parent_ids)
        .fetch_all(pool)
        .await
    }

    /// Every `(parent_id, child_id)` link.
    pub async fn edges(pool: &PgPool) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>("SELECT parent_id, child_id FROM hero_children")
            .fetch_all(pool)
            .await
    }

    /// Every hero that reaches `hero_id` through `hero_children`.
    async fn ancestors(
        conn: &mut PgConnection,
        hero_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        // UNION (not UNION ALL) stops on links that already loop.
        sqlx::query_scalar(
            "WITH RECURSIVE ancestors(id) AS (
                SELECT parent_id FROM hero_children WHERE child_id = $1
                UNION
                SELECT hc.parent_id
                FROM hero_children hc
                JOIN ancestors a ON hc.child_id = a.id
             )
             SELECT id FROM ancestors ORDER BY id",
        )
        .bind(hero_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Validate and write the child set of `parent_id`.
    ///
    /// Holds the lineage lock until the surrounding transaction ends, then
    /// checks the ids against committed rows and the parent's ancestors.
    async fn replace_children(
        conn: &mut PgConnection,
        parent_id: DbId,
        children: &[DbId],
    ) -> Result<(), HeroSaveError> {
        if !children.is_empty() {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(LINEAGE_LOCK_KEY)
                .execute(&mut *conn)
                .await?;

            let existing: Vec<DbId> =
                sqlx::query_scalar("SELECT id FROM heroes WHERE id = ANY($1)")
                    .bind(children)
                    .fetch_all(&mut *conn)
                    .await?;
            lineage::check_known_children(children, &existing)?;

            let ancestors = Self::ancestors(conn, parent_id).await?;
            lineage::validate_children(parent_id, children, &ancestors)?;
        }

        sqlx::query("DELETE FROM hero_children WHERE parent_id = $1")
            .bind(parent_id)
            .execute(&mut *conn)
            .await?;

        if !children.is_empty() {
            sqlx::query(
                "INSERT INTO hero_children (parent_id, child_id)
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(parent_id)
            .bind(children)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn fetch_in(conn: &mut PgConnection, id: DbId) -> Result<Hero, sqlx::Error> {
        let query = format!("{SELECT} WHERE h.id = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
