//! HTTP layer: axum handlers, routes, auth extractors, and the booking
//! engine orchestrating the reservation workflow.

pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;
