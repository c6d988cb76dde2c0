//! The booking engine: validates a reservation request, acquires the
//! per-office exclusivity lock, checks for overlapping active
//! reservations, computes the price, and persists the reservation.
//!
//! The overlap check and the insert both happen while the lock is held,
//! so two concurrent requests cannot both pass the check. The lock guard
//! releases on every exit path.

use std::time::Duration;

use officely_core::error::CoreError;
use officely_core::types::DbId;
use officely_core::{booking, pricing};
use officely_db::models::office::Office;
use officely_db::models::reservation::{
    CreateReservation, NewReservation, Reservation, ReservationDetails,
};
use officely_db::repositories::{OfficeRepo, ReservationRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Bounded wait for the per-office lock before giving up with a
/// retryable conflict.
pub const LOCK_MAX_WAIT: Duration = Duration::from_secs(3);

/// Create an ACTIVE reservation for `user_id` on the requested office.
///
/// All failure modes are detected before the insert; no partial
/// reservation is ever written.
pub async fn create_reservation(
    state: &AppState,
    user_id: DbId,
    input: &CreateReservation,
) -> AppResult<ReservationDetails> {
    let today = chrono::Utc::now().date_naive();
    booking::validate_window(today, input.start_date, input.end_date)?;

    // A missing office is a user-correctable input error, not a 404: the
    // id came from the request body.
    let office = OfficeRepo::find_by_id(&state.pool, input.office_id)
        .await?
        .ok_or_else(|| CoreError::validation("office_id", "Invalid office_id"))?;

    if office.user_id == user_id {
        return Err(CoreError::validation(
            "office_id",
            "You cannot make a reservation for your own office",
        )
        .into());
    }

    let key = format!("reservation:office:{}", office.id);
    let guard = state.lock.acquire(&key, LOCK_MAX_WAIT).await?;
    let result = check_and_insert(state, user_id, &office, input).await;
    drop(guard);

    let reservation = result?;
    tracing::info!(
        reservation_id = reservation.id,
        office_id = office.id,
        user_id,
        price = reservation.price,
        "reservation created"
    );

    let mut details = ReservationRepo::load_details(&state.pool, vec![reservation]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::InternalError("created reservation vanished".into()))
}

/// The overlap-check-and-insert sequence. Must only run while the
/// per-office lock is held.
async fn check_and_insert(
    state: &AppState,
    user_id: DbId,
    office: &Office,
    input: &CreateReservation,
) -> AppResult<Reservation> {
    let mut conn = state.pool.acquire().await?;

    let conflict = ReservationRepo::overlapping_active_exists(
        &mut conn,
        office.id,
        input.start_date,
        input.end_date,
    )
    .await?;
    if conflict {
        return Err(CoreError::validation(
            "office_id",
            "You cannot make a reservation during this period of time",
        )
        .into());
    }

    let quote = pricing::quote(
        input.start_date,
        input.end_date,
        office.price_per_day,
        office.monthly_discount,
    );

    let reservation = ReservationRepo::create(
        &mut conn,
        &NewReservation {
            office_id: office.id,
            user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            price: quote.price,
        },
    )
    .await?;

    Ok(reservation)
}
