use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::flags::{PaidSet, SkipSet};
use crate::schedule::Occurrence;

/// An occurrence is overdue when it is not skipped, its due date is
/// strictly before `today` (date-only, no time component), and it has
/// not been marked paid.
pub fn is_overdue(
    occurrence: &Occurrence,
    skips: &SkipSet,
    today: NaiveDate,
    paid: &PaidSet,
) -> bool {
    !skips.contains(&occurrence.id) && occurrence.due_date < today && !paid.contains(&occurrence.id)
}

/// The overdue subset of `occurrences`, in input order.
pub fn overdue<'a>(
    occurrences: &'a [Occurrence],
    skips: &SkipSet,
    today: NaiveDate,
    paid: &PaidSet,
) -> Vec<&'a Occurrence> {
    occurrences
        .iter()
        .filter(|o| is_overdue(o, skips, today, paid))
        .collect()
}

/// Paid vs pending counts over the non-skipped occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub paid: usize,
    pub pending: usize,
}

pub fn payment_status(
    occurrences: &[Occurrence],
    skips: &SkipSet,
    paid: &PaidSet,
) -> PaymentStatus {
    let mut status = PaymentStatus::default();
    for occurrence in occurrences {
        if skips.contains(&occurrence.id) {
            continue;
        }
        if paid.contains(&occurrence.id) {
            status.paid += 1;
        } else {
            status.pending += 1;
        }
    }
    status
}
