pub mod health;
pub mod office;
pub mod reservation;
pub mod tag;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tags                                  list (public)
///
/// /offices                               list (public), create (office.create)
/// /offices/{id}                          show (public), update (office.update),
///                                        delete (office.delete)
/// /offices/{id}/images                   upload (office.update)
/// /offices/{office_id}/images/{image_id} delete (office.update)
///
/// /reservations                          guest list (reservation.show),
///                                        create (reservation.create)
/// /host/reservations                     host list (reservation.show)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tags", tag::router())
        .nest("/offices", office::router())
        .nest("/reservations", reservation::guest_router())
        .nest("/host/reservations", reservation::host_router())
}
