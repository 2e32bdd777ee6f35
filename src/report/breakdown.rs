use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::flags::SkipSet;
use super::totals::MonthKey;
use crate::schedule::{EntryKind, Occurrence};

/// One category's slice of a month's income or expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Share of the month total for the same kind, in percent. Zero when
    /// the month total is zero.
    pub share: f64,
}

/// Per-category totals for one kind within one month, largest first.
///
/// Occurrences already carry the per-kind uncategorized fallback id, so
/// no value is ever dropped for lacking a catalog reference.
pub fn category_breakdown(
    occurrences: &[Occurrence],
    skips: &SkipSet,
    kind: EntryKind,
    month: MonthKey,
) -> Vec<CategoryShare> {
    let mut by_category: HashMap<&str, f64> = HashMap::new();
    let mut kind_total = 0.0;

    for occurrence in occurrences {
        if occurrence.kind != kind
            || skips.contains(&occurrence.id)
            || MonthKey::of(occurrence.due_date) != month
        {
            continue;
        }
        *by_category.entry(occurrence.category.as_str()).or_insert(0.0) += occurrence.value;
        kind_total += occurrence.value;
    }

    let mut shares: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            share: if kind_total > 0.0 {
                total / kind_total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    shares
}
