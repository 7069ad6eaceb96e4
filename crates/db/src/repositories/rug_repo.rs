//! Repository for the `rugs` table.

use rugcat_core::reconcile::NewRug;
use sqlx::PgPool;

use crate::models::rug::{Rug, UpdateRug};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rug_number, name, length_cm, width_cm, color, price_cents, \
                       image_path, created_at, updated_at";

/// Rugs with a positive price are the only ones shown in the catalog.
const SELLABLE: &str = "price_cents > 0";

/// Provides keyed upserts and catalog reads for rugs.
pub struct RugRepo;

impl RugRepo {
    /// Insert a rug or overwrite every imported field of the existing row
    /// with the same `rug_number`.
    ///
    /// On insert both timestamps get the same transaction time; on conflict
    /// only `updated_at` moves, which is how callers tell the two apart.
    pub async fn upsert(pool: &PgPool, input: &NewRug) -> Result<Rug, sqlx::Error> {
        let query = format!(
            "INSERT INTO rugs (rug_number, name, length_cm, width_cm, color, price_cents, image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (rug_number) DO UPDATE SET
                name = EXCLUDED.name,
                length_cm = EXCLUDED.length_cm,
                width_cm = EXCLUDED.width_cm,
                color = EXCLUDED.color,
                price_cents = EXCLUDED.price_cents,
                image_path = EXCLUDED.image_path,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rug>(&query)
            .bind(&input.rug_number)
            .bind(&input.name)
            .bind(input.length_cm)
            .bind(input.width_cm)
            .bind(&input.color)
            .bind(input.price_cents)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a rug by its inventory number.
    pub async fn find_by_rug_number(
        pool: &PgPool,
        rug_number: &str,
    ) -> Result<Option<Rug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rugs WHERE rug_number = $1");
        sqlx::query_as::<_, Rug>(&query)
            .bind(rug_number)
            .fetch_optional(pool)
            .await
    }

    /// One page of sellable rugs, newest first.
    pub async fn list_sellable(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rug>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rugs WHERE {SELLABLE}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Rug>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every sellable rug, newest first. Feeds the filter and name list.
    pub async fn list_all_sellable(pool: &PgPool) -> Result<Vec<Rug>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rugs WHERE {SELLABLE} ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Rug>(&query).fetch_all(pool).await
    }

    pub async fn count_sellable(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM rugs WHERE {SELLABLE}");
        let (count,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(count)
    }

    /// Every stored rug regardless of price, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Rug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rugs ORDER BY id");
        sqlx::query_as::<_, Rug>(&query).fetch_all(pool).await
    }

    /// Update a rug. Only provided fields in `input` are applied; an
    /// explicit `null` clears `name`, `color` or `image_path`.
    ///
    /// Returns `None` if no row with the given rug number exists.
    pub async fn update_partial(
        pool: &PgPool,
        rug_number: &str,
        input: &UpdateRug,
    ) -> Result<Option<Rug>, sqlx::Error> {
        let query = format!(
            "UPDATE rugs SET
                name = CASE WHEN $2 THEN $3 ELSE name END,
                length_cm = COALESCE($4, length_cm),
                width_cm = COALESCE($5, width_cm),
                color = CASE WHEN $6 THEN $7 ELSE color END,
                price_cents = COALESCE($8, price_cents),
                image_path = CASE WHEN $9 THEN $10 ELSE image_path END,
                updated_at = NOW()
             WHERE rug_number = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rug>(&query)
            .bind(rug_number)
            .bind(input.name.is_some())
            .bind(input.name.as_ref().and_then(|v| v.as_deref()))
            .bind(input.length_cm)
            .bind(input.width_cm)
            .bind(input.color.is_some())
            .bind(input.color.as_ref().and_then(|v| v.as_deref()))
            .bind(input.price_cents)
            .bind(input.image_path.is_some())
            .bind(input.image_path.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Point a rug at a new image. Returns `true` if a row was updated.
    pub async fn set_image_path(
        pool: &PgPool,
        rug_number: &str,
        image_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rugs SET image_path = $2, updated_at = NOW() WHERE rug_number = $1",
        )
        .bind(rug_number)
        .bind(image_path)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
