//! Repository for the `tags` table and the `office_tag` join table.

use officely_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tag::{OfficeTag, Tag};

pub struct TagRepo;

impl TagRepo {
    /// All tags, ascending by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Insert a new tag, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// The subset of `ids` that actually exist, for input validation.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Attach tags to an office. Runs inside the caller's transaction.
    pub async fn attach(
        conn: &mut PgConnection,
        office_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO office_tag (office_id, tag_id) SELECT $1, UNNEST($2::BIGINT[])")
            .bind(office_id)
            .bind(tag_ids)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Replace an office's tag associations with exactly `tag_ids`.
    /// Runs inside the caller's transaction.
    pub async fn sync(
        conn: &mut PgConnection,
        office_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM office_tag WHERE office_id = $1")
            .bind(office_id)
            .execute(&mut *conn)
            .await?;
        if !tag_ids.is_empty() {
            Self::attach(conn, office_id, tag_ids).await?;
        }
        Ok(())
    }

    /// Tags for a set of offices, keyed by office id.
    pub async fn list_for_offices(
        pool: &PgPool,
        office_ids: &[DbId],
    ) -> Result<Vec<OfficeTag>, sqlx::Error> {
        sqlx::query_as::<_, OfficeTag>(
            "SELECT ot.office_id AS office_id, t.id AS id, t.name AS name
               FROM office_tag ot
               JOIN tags t ON t.id = ot.tag_id
              WHERE ot.office_id = ANY($1)
              ORDER BY t.id ASC",
        )
        .bind(office_ids)
        .fetch_all(pool)
        .await
    }
}
