use officely_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

/// A tag joined with the office it is attached to, for bulk relation loads.
#[derive(Debug, Clone, FromRow)]
pub struct OfficeTag {
    pub office_id: DbId,
    #[sqlx(flatten)]
    pub tag: Tag,
}
