//! Reservation entity and DTOs.

use chrono::NaiveDate;
use officely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::office::OfficeWithFeaturedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

/// A row from the `reservations` table.
///
/// The date range is half-open `[start_date, end_date)`; `price` is
/// computed once at creation and never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub office_id: DbId,
    pub user_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub price: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    pub office_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Insert payload built by the booking engine after all checks pass.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub office_id: DbId,
    pub user_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: i64,
}

/// Reservation plus its eagerly loaded office, for listing responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetails {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub office: OfficeWithFeaturedImage,
}
