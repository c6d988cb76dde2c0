//! Office input validation.
//!
//! Range-checking helpers used by the office create/update handlers. Each
//! returns a `CoreError::Validation` naming the field if out of range.

use crate::error::CoreError;

/// Minimum nightly price in the smallest currency unit.
pub const MIN_PRICE_PER_DAY: i64 = 100;

/// Maximum monthly discount percentage.
pub const MAX_MONTHLY_DISCOUNT: i32 = 90;

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::validation("title", "title must not be empty"));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::validation(
            "description",
            "description must not be empty",
        ));
    }
    Ok(())
}

/// Latitude in `[-90, 90]`, longitude in `[-180, 180]` decimal degrees.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CoreError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::validation(
            "lat",
            format!("lat must be between -90 and 90, got {lat}"),
        ));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::validation(
            "lng",
            format!("lng must be between -180 and 180, got {lng}"),
        ));
    }
    Ok(())
}

pub fn validate_price_per_day(price_per_day: i64) -> Result<(), CoreError> {
    if price_per_day < MIN_PRICE_PER_DAY {
        return Err(CoreError::validation(
            "price_per_day",
            format!("price_per_day must be at least {MIN_PRICE_PER_DAY}"),
        ));
    }
    Ok(())
}

pub fn validate_monthly_discount(monthly_discount: i32) -> Result<(), CoreError> {
    if !(0..=MAX_MONTHLY_DISCOUNT).contains(&monthly_discount) {
        return Err(CoreError::validation(
            "monthly_discount",
            format!("monthly_discount must be between 0 and {MAX_MONTHLY_DISCOUNT}"),
        ));
    }
    Ok(())
}
