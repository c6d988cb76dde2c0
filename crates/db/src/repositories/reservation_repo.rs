//! Repository for the `reservations` table: date-range overlap queries,
//! status filtering, and guest/host listing views.
//!
//! All range comparisons use the half-open `[start_date, end_date)`
//! convention: two reservations overlap iff `a.start < b.end` and
//! `a.end > b.start`.

use std::collections::HashMap;

use chrono::NaiveDate;
use officely_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::office::OfficeWithFeaturedImage;
use crate::models::reservation::{
    NewReservation, Reservation, ReservationDetails, ReservationStatus,
};
use crate::repositories::{ImageRepo, OfficeRepo};
use crate::PAGE_SIZE;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, office_id, user_id, start_date, end_date, status, price, \
    created_at, updated_at";

/// Same columns qualified with the `r` alias, for joined queries.
const R_COLUMNS: &str = "r.id, r.office_id, r.user_id, r.start_date, r.end_date, \
    r.status, r.price, r.created_at, r.updated_at";

/// Filters accepted by the listing queries.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilters {
    pub office_id: Option<DbId>,
    /// Guest filter; only meaningful for the host view.
    pub user_id: Option<DbId>,
    pub status: Option<ReservationStatus>,
    /// Window filter: reservations overlapping `[from_date, to_date)`.
    /// Both bounds are set or neither is.
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// 1-based page number.
    pub page: i64,
}

pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a new ACTIVE reservation. Called by the booking engine while
    /// the per-office lock is held.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations (office_id, user_id, start_date, end_date, status, price)
             VALUES ($1, $2, $3, $4, 'active', $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.office_id)
            .bind(input.user_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.price)
            .fetch_one(conn)
            .await
    }

    /// Whether any ACTIVE reservation for `office_id` overlaps
    /// `[start, end)`.
    pub async fn overlapping_active_exists(
        conn: &mut PgConnection,
        office_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM reservations
                 WHERE office_id = $1
                   AND status = 'active'
                   AND start_date < $3
                   AND end_date > $2)",
        )
        .bind(office_id)
        .bind(start)
        .bind(end)
        .fetch_one(conn)
        .await
    }

    /// Whether any ACTIVE reservation exists for an office, regardless of
    /// dates. Gates office deletion.
    pub async fn active_exists_for_office(
        pool: &PgPool,
        office_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM reservations WHERE office_id = $1 AND status = 'active')",
        )
        .bind(office_id)
        .fetch_one(pool)
        .await
    }

    /// Reservations made by `user_id` as a guest, newest filters applied.
    pub async fn list_for_guest(
        pool: &PgPool,
        user_id: DbId,
        filters: &ReservationFilters,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
              WHERE user_id = $1
                AND ($2::BIGINT IS NULL OR office_id = $2)
                AND ($3::reservation_status IS NULL OR status = $3)
                AND ($4::DATE IS NULL OR (start_date < $5 AND end_date > $4))
              ORDER BY id ASC
              LIMIT $6 OFFSET $7"
        );
        let page = filters.page.max(1);
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .bind(filters.office_id)
            .bind(filters.status)
            .bind(filters.from_date)
            .bind(filters.to_date)
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(pool)
            .await
    }

    /// Reservations on offices owned by `host_id`, optionally narrowed to
    /// one guest.
    pub async fn list_for_host(
        pool: &PgPool,
        host_id: DbId,
        filters: &ReservationFilters,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS} FROM reservations r
               JOIN offices o ON o.id = r.office_id
              WHERE o.user_id = $1
                AND ($2::BIGINT IS NULL OR r.office_id = $2)
                AND ($3::BIGINT IS NULL OR r.user_id = $3)
                AND ($4::reservation_status IS NULL OR r.status = $4)
                AND ($5::DATE IS NULL OR (r.start_date < $6 AND r.end_date > $5))
              ORDER BY r.id ASC
              LIMIT $7 OFFSET $8"
        );
        let page = filters.page.max(1);
        sqlx::query_as::<_, Reservation>(&query)
            .bind(host_id)
            .bind(filters.office_id)
            .bind(filters.user_id)
            .bind(filters.status)
            .bind(filters.from_date)
            .bind(filters.to_date)
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(pool)
            .await
    }

    /// Eagerly load each reservation's office and the office's featured
    /// image. Offices are fetched even if soft-deleted so historical
    /// reservations keep their context.
    pub async fn load_details(
        pool: &PgPool,
        rows: Vec<Reservation>,
    ) -> Result<Vec<ReservationDetails>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let office_ids: Vec<DbId> = rows.iter().map(|r| r.office_id).collect();
        let offices_by_id: HashMap<DbId, _> = OfficeRepo::find_by_ids(pool, &office_ids)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        let featured_ids: Vec<DbId> = offices_by_id
            .values()
            .filter_map(|o| o.featured_image_id)
            .collect();
        let featured_by_id: HashMap<DbId, _> = ImageRepo::find_by_ids(pool, &featured_ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();

        rows.into_iter()
            .map(|reservation| {
                let office = offices_by_id
                    .get(&reservation.office_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                let featured_image = office
                    .featured_image_id
                    .and_then(|fid| featured_by_id.get(&fid).cloned());
                Ok(ReservationDetails {
                    reservation,
                    office: OfficeWithFeaturedImage {
                        office,
                        featured_image,
                    },
                })
            })
            .collect()
    }
}
