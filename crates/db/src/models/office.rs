//! Office entity, DTOs, and read-only projections.

use officely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::image::Image;
use crate::models::tag::Tag;
use crate::models::user::User;

/// Administrative gate controlling public visibility of an office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A row from the `offices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Office {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub address_line1: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub price_per_day: i64,
    pub monthly_discount: i32,
    pub approval_status: ApprovalStatus,
    pub hidden: bool,
    pub featured_image_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new office.
///
/// Owner and approval status are never taken from the request: the handler
/// forces the authenticated user as owner and `pending` as status.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOffice {
    pub title: String,
    pub description: String,
    pub address_line1: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub price_per_day: i64,
    pub monthly_discount: Option<i32>,
    pub hidden: Option<bool>,
    pub tags: Option<Vec<DbId>>,
}

/// DTO for updating an existing office. Only the fields present are
/// applied; this is the full allow-list of host-mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOffice {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address_line1: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price_per_day: Option<i64>,
    pub monthly_discount: Option<i32>,
    pub hidden: Option<bool>,
    /// Absent means "leave unchanged"; an explicit `null` clears the
    /// featured image. The outer `Option` tracks field presence.
    #[serde(default, deserialize_with = "double_option")]
    pub featured_image_id: Option<Option<DbId>>,
    /// When present, fully replaces the office's tag associations.
    pub tags: Option<Vec<DbId>>,
}

/// Deserialize a nullable field keeping presence: a plain
/// `Option<Option<T>>` would collapse JSON `null` into the outer `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An office row annotated with its ACTIVE reservation count, as produced
/// by the listing query.
#[derive(Debug, Clone, FromRow)]
pub struct OfficeListRow {
    #[sqlx(flatten)]
    pub office: Office,
    pub reservations_count: i64,
}

/// Full read-only projection returned to clients: the office plus its
/// eagerly loaded relations. Computed per query, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeDetails {
    #[serde(flatten)]
    pub office: Office,
    pub reservations_count: i64,
    pub images: Vec<Image>,
    pub tags: Vec<Tag>,
    pub user: User,
    pub featured_image: Option<Image>,
}

/// Office plus featured image, embedded in reservation listings.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeWithFeaturedImage {
    #[serde(flatten)]
    pub office: Office,
    pub featured_image: Option<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_image_absent_means_unchanged() {
        let input: UpdateOffice = serde_json::from_str(r#"{"title": "Renamed"}"#).unwrap();
        assert_eq!(input.featured_image_id, None);
    }

    #[test]
    fn featured_image_null_means_clear() {
        let input: UpdateOffice =
            serde_json::from_str(r#"{"featured_image_id": null}"#).unwrap();
        assert_eq!(input.featured_image_id, Some(None));
    }

    #[test]
    fn featured_image_value_means_set() {
        let input: UpdateOffice =
            serde_json::from_str(r#"{"featured_image_id": 7}"#).unwrap();
        assert_eq!(input.featured_image_id, Some(Some(7)));
    }
}
