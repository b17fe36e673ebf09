use chrono::{Datelike, NaiveDate};

use super::utils::Bound;
use crate::utils::date::add_years_exact;

/// Every `interval` years on the anchor's month and day.
///
/// A Feb 29 anchor only occurs in leap years.
pub(super) fn generate(anchor: NaiveDate, interval: u32, bound: &Bound) -> Vec<NaiveDate> {
    let mut occurrences = Vec::new();
    let mut k = 0i64;

    loop {
        if bound.is_full(occurrences.len()) {
            break;
        }

        let Some(years) = i64::from(interval).checked_mul(k) else {
            break;
        };

        match add_years_exact(anchor, years) {
            Some(date) => {
                if bound.is_past(date) {
                    break;
                }
                occurrences.push(date);
            }
            None => {
                let month_start = i32::try_from(i64::from(anchor.year()) + years)
                    .ok()
                    .and_then(|year| NaiveDate::from_ymd_opt(year, anchor.month(), 1));
                let Some(month_start) = month_start else {
                    break;
                };
                if bound.is_past(month_start) {
                    break;
                }
            }
        }

        k += 1;
    }

    occurrences
}
