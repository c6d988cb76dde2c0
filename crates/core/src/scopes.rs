//! Capability scopes granted to an authenticated session.
//!
//! Scopes are an enumerated type rather than free-form strings so a typo in
//! a scope check fails to compile instead of silently granting nothing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A capability granted by the identity provider to a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "office.create")]
    OfficeCreate,
    #[serde(rename = "office.update")]
    OfficeUpdate,
    #[serde(rename = "office.delete")]
    OfficeDelete,
    #[serde(rename = "reservation.create")]
    ReservationCreate,
    #[serde(rename = "reservation.show")]
    ReservationShow,
}

impl Scope {
    /// The wire name of the scope, as it appears in token claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::OfficeCreate => "office.create",
            Scope::OfficeUpdate => "office.update",
            Scope::OfficeDelete => "office.delete",
            Scope::ReservationCreate => "reservation.create",
            Scope::ReservationShow => "reservation.show",
        }
    }

    /// Every scope, for sessions granted full access (e.g. test fixtures).
    pub fn all() -> Vec<Scope> {
        vec![
            Scope::OfficeCreate,
            Scope::OfficeUpdate,
            Scope::OfficeDelete,
            Scope::ReservationCreate,
            Scope::ReservationShow,
        ]
    }
}

/// Check that `granted` contains `required`, or fail with `Forbidden`.
pub fn require_scope(granted: &[Scope], required: Scope) -> Result<(), CoreError> {
    if granted.contains(&required) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Missing required scope: {}",
            required.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_serializes_to_dotted_name() {
        let json = serde_json::to_string(&Scope::OfficeCreate).unwrap();
        assert_eq!(json, "\"office.create\"");
    }

    #[test]
    fn scope_round_trips_through_serde() {
        for scope in Scope::all() {
            let json = serde_json::to_string(&scope).unwrap();
            let back: Scope = serde_json::from_str(&json).unwrap();
            assert_eq!(scope, back);
        }
    }

    #[test]
    fn require_scope_accepts_granted() {
        let granted = vec![Scope::ReservationCreate, Scope::ReservationShow];
        assert!(require_scope(&granted, Scope::ReservationCreate).is_ok());
    }

    #[test]
    fn require_scope_rejects_missing() {
        let granted = vec![Scope::ReservationShow];
        let err = require_scope(&granted, Scope::OfficeCreate).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }
}
