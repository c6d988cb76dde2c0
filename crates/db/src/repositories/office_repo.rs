//! Repository for the `offices` table: CRUD plus the listing query engine
//! (visibility rules, relation filters, geo-distance ordering).

use std::collections::HashMap;

use officely_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::image::Image;
use crate::models::office::{CreateOffice, Office, OfficeDetails, OfficeListRow};
use crate::models::tag::Tag;
use crate::repositories::{ImageRepo, TagRepo, UserRepo};
use crate::PAGE_SIZE;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, address_line1, lat, lng, \
    price_per_day, monthly_discount, approval_status, hidden, featured_image_id, \
    deleted_at, created_at, updated_at";

/// Same columns qualified with the `o` alias, for joined queries.
const O_COLUMNS: &str = "o.id, o.user_id, o.title, o.description, o.address_line1, \
    o.lat, o.lng, o.price_per_day, o.monthly_discount, o.approval_status, o.hidden, \
    o.featured_image_id, o.deleted_at, o.created_at, o.updated_at";

/// Subquery annotating each office with its ACTIVE reservation count.
const ACTIVE_COUNT: &str = "(SELECT COUNT(*) FROM reservations r \
    WHERE r.office_id = o.id AND r.status = 'active') AS reservations_count";

/// Filters accepted by [`OfficeRepo::list`].
#[derive(Debug, Clone, Default)]
pub struct OfficeFilters {
    /// Restrict to offices owned by this user.
    pub user_id: Option<DbId>,
    /// Restrict to offices that have at least one reservation by this guest.
    pub visitor_id: Option<DbId>,
    /// When both are set, order ascending by great-circle distance to this
    /// coordinate instead of by id.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// When true, the approved-and-not-hidden visibility rule is waived
    /// (an owner inspecting their own listings).
    pub include_unapproved: bool,
    /// 1-based page number.
    pub page: i64,
}

pub struct OfficeRepo;

impl OfficeRepo {
    /// Insert a new office owned by `user_id`. Approval status is forced to
    /// `pending` regardless of input. Runs inside the caller's transaction
    /// so tag attachment can share it.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        input: &CreateOffice,
    ) -> Result<Office, sqlx::Error> {
        let query = format!(
            "INSERT INTO offices
                (user_id, title, description, address_line1, lat, lng,
                 price_per_day, monthly_discount, hidden, approval_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), COALESCE($9, FALSE), 'pending')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.address_line1)
            .bind(input.lat)
            .bind(input.lng)
            .bind(input.price_per_day)
            .bind(input.monthly_discount)
            .bind(input.hidden)
            .fetch_one(conn)
            .await
    }

    /// Find an office by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Office>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offices WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Office>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch offices by id, including soft-deleted rows. Used when embedding
    /// an office in a reservation listing, where the listing may be gone.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Office>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offices WHERE id = ANY($1)");
        sqlx::query_as::<_, Office>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Persist the full allow-list of mutable fields plus the approval
    /// status. Runs inside the caller's transaction so tag sync can share
    /// it. Returns `None` if the office no longer exists.
    pub async fn save(conn: &mut PgConnection, office: &Office) -> Result<Option<Office>, sqlx::Error> {
        let query = format!(
            "UPDATE offices SET
                title = $2, description = $3, address_line1 = $4, lat = $5, lng = $6,
                price_per_day = $7, monthly_discount = $8, hidden = $9,
                featured_image_id = $10, approval_status = $11, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(office.id)
            .bind(&office.title)
            .bind(&office.description)
            .bind(&office.address_line1)
            .bind(office.lat)
            .bind(office.lng)
            .bind(office.price_per_day)
            .bind(office.monthly_discount)
            .bind(office.hidden)
            .bind(office.featured_image_id)
            .bind(office.approval_status)
            .fetch_optional(conn)
            .await
    }

    /// Soft-delete an office. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offices SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The listing query: visibility rules, ownership and visitor filters,
    /// active-reservation counts, and ordering.
    ///
    /// Ordering is ascending haversine distance when a query coordinate is
    /// given, ascending id otherwise. Page size is fixed at [`PAGE_SIZE`].
    pub async fn list(
        pool: &PgPool,
        filters: &OfficeFilters,
    ) -> Result<Vec<OfficeListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {O_COLUMNS}, {ACTIVE_COUNT}
               FROM offices o
              WHERE o.deleted_at IS NULL
                AND ($1::BIGINT IS NULL OR o.user_id = $1)
                AND ($2::BIGINT IS NULL OR EXISTS (
                     SELECT 1 FROM reservations v
                      WHERE v.office_id = o.id AND v.user_id = $2))
                AND ($3::BOOLEAN OR (o.approval_status = 'approved' AND o.hidden = FALSE))
              ORDER BY CASE
                  WHEN $4::DOUBLE PRECISION IS NOT NULL AND $5::DOUBLE PRECISION IS NOT NULL THEN
                      2 * 6371 * asin(sqrt(LEAST(1.0,
                          power(sin(radians(o.lat - $4) / 2), 2)
                          + cos(radians($4)) * cos(radians(o.lat))
                          * power(sin(radians(o.lng - $5) / 2), 2))))
                  ELSE o.id::DOUBLE PRECISION
              END ASC
              LIMIT $6 OFFSET $7"
        );
        let page = filters.page.max(1);
        sqlx::query_as::<_, OfficeListRow>(&query)
            .bind(filters.user_id)
            .bind(filters.visitor_id)
            .bind(filters.include_unapproved)
            .bind(filters.lat)
            .bind(filters.lng)
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(pool)
            .await
    }

    /// Single office annotated with its ACTIVE reservation count.
    /// Excludes soft-deleted rows.
    pub async fn find_list_row(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OfficeListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {O_COLUMNS}, {ACTIVE_COUNT}
               FROM offices o
              WHERE o.id = $1 AND o.deleted_at IS NULL"
        );
        sqlx::query_as::<_, OfficeListRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Eagerly load images, tags, owner, and featured image for a page of
    /// listing rows. Read-only projection, computed per query.
    pub async fn load_details(
        pool: &PgPool,
        rows: Vec<OfficeListRow>,
    ) -> Result<Vec<OfficeDetails>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let office_ids: Vec<DbId> = rows.iter().map(|r| r.office.id).collect();
        let user_ids: Vec<DbId> = rows.iter().map(|r| r.office.user_id).collect();

        let mut images_by_office: HashMap<DbId, Vec<Image>> = HashMap::new();
        for image in ImageRepo::list_for_offices(pool, &office_ids).await? {
            images_by_office.entry(image.office_id).or_default().push(image);
        }

        let mut tags_by_office: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for office_tag in TagRepo::list_for_offices(pool, &office_ids).await? {
            tags_by_office
                .entry(office_tag.office_id)
                .or_default()
                .push(office_tag.tag);
        }

        let users_by_id: HashMap<DbId, _> = UserRepo::list_by_ids(pool, &user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        rows.into_iter()
            .map(|row| {
                let images = images_by_office.remove(&row.office.id).unwrap_or_default();
                let featured_image = row
                    .office
                    .featured_image_id
                    .and_then(|fid| images.iter().find(|i| i.id == fid).cloned());
                let user = users_by_id
                    .get(&row.office.user_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok(OfficeDetails {
                    reservations_count: row.reservations_count,
                    images,
                    tags: tags_by_office.remove(&row.office.id).unwrap_or_default(),
                    user,
                    featured_image,
                    office: row.office,
                })
            })
            .collect()
    }
}
