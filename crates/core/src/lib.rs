//! Pure domain logic for the office booking marketplace.
//!
//! No I/O lives here: this crate holds the error taxonomy, capability
//! scopes, booking-window validation, price computation, and office input
//! validation. Everything is unit-testable without a database.

pub mod booking;
pub mod error;
pub mod office;
pub mod pricing;
pub mod scopes;
pub mod types;
