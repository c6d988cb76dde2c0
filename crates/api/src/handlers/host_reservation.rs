//! Handler for the host view of reservations: bookings made by guests on
//! offices the caller owns.

use axum::extract::{Query, State};
use axum::Json;
use officely_core::scopes::Scope;
use officely_db::models::reservation::ReservationDetails;
use officely_db::repositories::ReservationRepo;

use crate::error::AppResult;
use crate::handlers::reservation::ListReservationsQuery;
use crate::middleware::AuthUser;
use crate::response::Paginated;
use crate::state::AppState;

/// GET /api/v1/host/reservations
pub async fn index(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListReservationsQuery>,
) -> AppResult<Json<Paginated<ReservationDetails>>> {
    user.require(Scope::ReservationShow)?;

    let filters = query.into_filters()?;
    let rows = ReservationRepo::list_for_host(&state.pool, user.user_id, &filters).await?;
    let data = ReservationRepo::load_details(&state.pool, rows).await?;
    Ok(Json(Paginated::new(data, filters.page)))
}
