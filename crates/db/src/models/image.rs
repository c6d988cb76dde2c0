use officely_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `images` table.
///
/// Each image belongs to exactly one office.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub office_id: DbId,
    pub path: String,
    pub created_at: Timestamp,
}
