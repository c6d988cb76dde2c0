use axum::routing::get;
use axum::Router;

use crate::handlers::{host_reservation, reservation};
use crate::state::AppState;

/// Guest reservation routes -- mounted at `/reservations`.
pub fn guest_router() -> Router<AppState> {
    Router::new().route("/", get(reservation::index).post(reservation::create))
}

/// Host reservation routes -- mounted at `/host/reservations`.
pub fn host_router() -> Router<AppState> {
    Router::new().route("/", get(host_reservation::index))
}
