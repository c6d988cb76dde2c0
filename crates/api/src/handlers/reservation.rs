//! Handlers for the guest view of `/reservations`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use officely_core::error::CoreError;
use officely_core::scopes::Scope;
use officely_core::types::DbId;
use officely_db::models::reservation::{
    CreateReservation, ReservationDetails, ReservationStatus,
};
use officely_db::repositories::reservation_repo::ReservationFilters;
use officely_db::repositories::ReservationRepo;
use serde::Deserialize;

use crate::booking;
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters shared by the guest and host reservation listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListReservationsQuery {
    pub office_id: Option<DbId>,
    /// Guest filter; only honoured by the host view.
    pub user_id: Option<DbId>,
    pub status: Option<ReservationStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub page: Option<i64>,
}

impl ListReservationsQuery {
    /// Convert to repository filters, enforcing that `from_date` and
    /// `to_date` come as a pair with `from_date` first.
    pub fn into_filters(self) -> Result<ReservationFilters, CoreError> {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) if from >= to => {
                return Err(CoreError::validation(
                    "from_date",
                    "from_date must be before to_date",
                ));
            }
            (Some(_), None) => {
                return Err(CoreError::validation(
                    "to_date",
                    "to_date is required with from_date",
                ));
            }
            (None, Some(_)) => {
                return Err(CoreError::validation(
                    "from_date",
                    "from_date is required with to_date",
                ));
            }
            _ => {}
        }
        Ok(ReservationFilters {
            office_id: self.office_id,
            user_id: self.user_id,
            status: self.status,
            from_date: self.from_date,
            to_date: self.to_date,
            page: self.page.unwrap_or(1),
        })
    }
}

/// GET /api/v1/reservations
///
/// The caller's own reservations as a guest.
pub async fn index(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListReservationsQuery>,
) -> AppResult<Json<Paginated<ReservationDetails>>> {
    user.require(Scope::ReservationShow)?;

    let filters = query.into_filters()?;
    let rows = ReservationRepo::list_for_guest(&state.pool, user.user_id, &filters).await?;
    let data = ReservationRepo::load_details(&state.pool, rows).await?;
    Ok(Json(Paginated::new(data, filters.page)))
}

/// POST /api/v1/reservations
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<DataResponse<ReservationDetails>>)> {
    user.require(Scope::ReservationCreate)?;

    let details = booking::create_reservation(&state, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: details })))
}
