//! HTTP handlers, one module per resource.

pub mod health;
pub mod host_reservation;
pub mod office;
pub mod office_image;
pub mod reservation;
pub mod tag;
