//! Token handling for the external identity provider's access tokens.
//!
//! Token issuance (registration, login, refresh) is out of scope; this
//! module only validates HS256 access tokens and exposes their claims.

pub mod jwt;
