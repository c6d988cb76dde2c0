//! Reservation price computation.
//!
//! Prices are integers in the smallest currency unit. A reservation of
//! `[start, end)` spans `end - start` whole calendar days (nights).

use chrono::NaiveDate;

/// Number of days at or above which the monthly discount kicks in.
pub const MONTHLY_DISCOUNT_MIN_DAYS: i64 = 28;

/// A computed reservation price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Whole calendar days between start and end.
    pub days: i64,
    /// Total price in the smallest currency unit.
    pub price: i64,
}

/// Compute the price for a `[start, end)` reservation window.
///
/// `price = days * price_per_day`. For stays of 28 days or more with a
/// nonzero `monthly_discount`, `monthly_discount / 100` currency units are
/// subtracted from the total (an absolute subtraction, not a percentage of
/// the total), truncated down to a whole unit.
///
/// TODO: confirm with product whether the long-stay discount is really
/// meant as an absolute subtraction of `monthly_discount / 100` rather
/// than `price * monthly_discount / 100`; this reproduces the historical
/// billing behaviour as-is.
pub fn quote(start: NaiveDate, end: NaiveDate, price_per_day: i64, monthly_discount: i32) -> Quote {
    let days = (end - start).num_days();
    let mut price = days * price_per_day;

    if days >= MONTHLY_DISCOUNT_MIN_DAYS && monthly_discount > 0 {
        price = ((price as f64) - (f64::from(monthly_discount) / 100.0)).floor() as i64;
    }

    Quote { days, price }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn four_nights_at_1000_costs_4000() {
        let q = quote(d("2021-03-01"), d("2021-03-05"), 1000, 0);
        assert_eq!(q.days, 4);
        assert_eq!(q.price, 4000);
    }

    #[test]
    fn no_discount_below_28_days() {
        // 27 days with a discount configured: discount must not apply.
        let q = quote(d("2021-03-01"), d("2021-03-28"), 1000, 50);
        assert_eq!(q.days, 27);
        assert_eq!(q.price, 27_000);
    }

    #[test]
    fn discount_applies_at_28_days() {
        // 28 days at 1000/day = 28000; discount 50 subtracts 0.5 units,
        // truncated down to 27999.
        let q = quote(d("2021-03-01"), d("2021-03-29"), 1000, 50);
        assert_eq!(q.days, 28);
        assert_eq!(q.price, 27_999);
    }

    #[test]
    fn zero_discount_leaves_long_stay_price_untouched() {
        let q = quote(d("2021-03-01"), d("2021-04-01"), 2000, 0);
        assert_eq!(q.days, 31);
        assert_eq!(q.price, 62_000);
    }

    #[test]
    fn single_night() {
        let q = quote(d("2021-03-01"), d("2021-03-02"), 1500, 0);
        assert_eq!(q.days, 1);
        assert_eq!(q.price, 1500);
    }
}
