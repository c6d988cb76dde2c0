//! Booking-window validation for reservation creation.

use chrono::{Duration, NaiveDate};

use crate::error::CoreError;

/// Minimum lead time in days: a reservation must start strictly after
/// today plus this many days.
pub const MIN_LEAD_DAYS: i64 = 1;

/// Validate a requested reservation window against `today`.
///
/// - `start` must be strictly after `today + MIN_LEAD_DAYS`.
/// - `end` must be strictly after `start` (half-open `[start, end)` range,
///   so a same-day reservation is invalid).
pub fn validate_window(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if start <= today + Duration::days(MIN_LEAD_DAYS) {
        return Err(CoreError::validation(
            "start_date",
            "start_date must be at least one day in the future",
        ));
    }
    if end <= start {
        return Err(CoreError::validation(
            "end_date",
            "end_date must be after start_date",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_start_today() {
        let err = validate_window(d("2021-03-01"), d("2021-03-01"), d("2021-03-05")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation { field: "start_date", .. }
        ));
    }

    #[test]
    fn rejects_start_tomorrow() {
        // Tomorrow is exactly today + MIN_LEAD_DAYS, which is not enough.
        assert!(validate_window(d("2021-03-01"), d("2021-03-02"), d("2021-03-05")).is_err());
    }

    #[test]
    fn accepts_start_day_after_tomorrow() {
        assert!(validate_window(d("2021-03-01"), d("2021-03-03"), d("2021-03-05")).is_ok());
    }

    #[test]
    fn rejects_end_equal_to_start() {
        let err = validate_window(d("2021-03-01"), d("2021-03-05"), d("2021-03-05")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation { field: "end_date", .. }
        ));
    }

    #[test]
    fn rejects_end_before_start() {
        assert!(validate_window(d("2021-03-01"), d("2021-03-10"), d("2021-03-05")).is_err());
    }
}
