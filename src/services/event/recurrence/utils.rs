use chrono::{Duration, NaiveDate};

/// Limits that every generator honours.
pub(super) struct Bound {
    /// Inclusive last date an occurrence may fall on.
    pub until: Option<NaiveDate>,
    pub max_occurrences: usize,
}

impl Bound {
    pub fn is_full(&self, generated: usize) -> bool {
        generated >= self.max_occurrences
    }

    /// True once `date` lies after the inclusive end bound.
    pub fn is_past(&self, date: NaiveDate) -> bool {
        self.until.is_some_and(|until| date > until)
    }
}

/// `anchor + step * k` days, `None` when it leaves chrono's range.
pub(super) fn offset_days(anchor: NaiveDate, step: i64, k: i64) -> Option<NaiveDate> {
    let days = step.checked_mul(k)?;
    anchor.checked_add_signed(Duration::try_days(days)?)
}

/// Fixed-stride generator shared by daily and weekly series.
pub(super) fn generate_fixed_stride(anchor: NaiveDate, stride_days: i64, bound: &Bound) -> Vec<NaiveDate> {
    let mut occurrences = Vec::new();
    let mut k = 0i64;

    loop {
        if bound.is_full(occurrences.len()) {
            break;
        }

        let Some(date) = offset_days(anchor, stride_days, k) else {
            break;
        };

        if bound.is_past(date) {
            break;
        }

        occurrences.push(date);
        k += 1;
    }

    occurrences
}
