//! Route definitions for offices and their images.
//!
//! ```text
//! GET    /                              list
//! POST   /                              create
//! GET    /{id}                          show
//! PUT    /{id}                          update
//! DELETE /{id}                          destroy
//! POST   /{id}/images                   upload image
//! DELETE /{office_id}/images/{image_id} delete image
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{office, office_image};
use crate::state::AppState;

/// Office routes -- mounted at `/offices`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(office::list).post(office::create))
        .route(
            "/{id}",
            get(office::show).put(office::update).delete(office::destroy),
        )
        .route("/{id}/images", post(office_image::store))
        .route(
            "/{office_id}/images/{image_id}",
            delete(office_image::destroy),
        )
}
