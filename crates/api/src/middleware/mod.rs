//! Request extractors for authentication and capability checks.

pub mod auth;

pub use auth::{AuthUser, OptionalAuthUser};
