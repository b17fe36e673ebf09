use chrono::NaiveDate;

use super::utils::{generate_fixed_stride, Bound};

/// Every `interval` weeks on the anchor's weekday.
pub(super) fn generate(anchor: NaiveDate, interval: u32, bound: &Bound) -> Vec<NaiveDate> {
    generate_fixed_stride(anchor, 7 * i64::from(interval), bound)
}
