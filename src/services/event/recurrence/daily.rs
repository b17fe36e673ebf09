use chrono::NaiveDate;

use super::utils::{generate_fixed_stride, Bound};

pub(super) fn generate(anchor: NaiveDate, interval: u32, bound: &Bound) -> Vec<NaiveDate> {
    generate_fixed_stride(anchor, i64::from(interval), bound)
}
