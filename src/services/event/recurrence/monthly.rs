use chrono::NaiveDate;

use super::utils::Bound;
use crate::utils::date::{add_months_exact, first_of_month_offset};

/// Every `interval` months on the anchor's day of month.
///
/// Months without that day (Feb 30, Apr 31, ...) produce no occurrence. Each
/// candidate is computed from the anchor so a skipped month never shifts the
/// day of later occurrences.
pub(super) fn generate(anchor: NaiveDate, interval: u32, bound: &Bound) -> Vec<NaiveDate> {
    let mut occurrences = Vec::new();
    let mut k = 0i64;

    loop {
        if bound.is_full(occurrences.len()) {
            break;
        }

        let Some(months) = i64::from(interval).checked_mul(k) else {
            break;
        };

        match add_months_exact(anchor, months) {
            Some(date) => {
                if bound.is_past(date) {
                    break;
                }
                occurrences.push(date);
            }
            None => {
                // Skipped month: stop only if the whole month is past the bound.
                let Some(month_start) = first_of_month_offset(anchor, months) else {
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
