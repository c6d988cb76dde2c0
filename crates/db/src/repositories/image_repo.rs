//! Repository for the `images` table.

use officely_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::Image;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, office_id, path, created_at";

pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image linked to an office, returning the created row.
    pub async fn create(pool: &PgPool, office_id: DbId, path: &str) -> Result<Image, sqlx::Error> {
        let query =
            format!("INSERT INTO images (office_id, path) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Image>(&query)
            .bind(office_id)
            .bind(path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ANY($1)");
        sqlx::query_as::<_, Image>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Number of images currently owned by an office.
    pub async fn count_for_office(pool: &PgPool, office_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM images WHERE office_id = $1")
            .bind(office_id)
            .fetch_one(pool)
            .await
    }

    /// Images for a set of offices, ordered by id for stable responses.
    pub async fn list_for_offices(
        pool: &PgPool,
        office_ids: &[DbId],
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM images WHERE office_id = ANY($1) ORDER BY id ASC");
        sqlx::query_as::<_, Image>(&query)
            .bind(office_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete an image row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
