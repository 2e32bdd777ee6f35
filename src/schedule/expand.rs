use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{Entry, EntryKind, Recurrence};
use super::frequency::add_months;

/// Hard cap on occurrences generated per entry, independent of the
/// horizon. The horizon alone bounds well-formed input; the cap keeps
/// the loop finite against corrupt dates from persisted data.
const MAX_OCCURRENCES_PER_ENTRY: usize = 1024;

/// Horizon used by the reference caller when expanding for display.
pub const DEFAULT_HORIZON_MONTHS: u32 = 120;

/// Stable identifier of a single occurrence, derived purely from the
/// owning entry id and the occurrence's calendar date. Skip and payment
/// sets are keyed by this id, so it must not depend on array position
/// or invocation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    pub fn derive(entry_id: Uuid, date: NaiveDate) -> Self {
        OccurrenceId(format!(
            "{}_{:04}{:02}_{:02}",
            entry_id,
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A materialized, dated instance of an entry. Never persisted and never
/// mutated; recomputed from the entry list on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub entry_id: Uuid,
    pub kind: EntryKind,
    pub description: String,
    pub value: f64,
    pub due_date: NaiveDate,
    /// 1-based installment index; set for one-shot and installment
    /// occurrences, absent for indefinite ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    pub recurrence: Recurrence,
    pub category: String,
}

/// Expands every entry into its dated occurrences, bounded into the
/// future by `today + horizon_months`.
///
/// Pure: `today` anchors the horizon and is never read from a clock, so
/// identical inputs always produce the identical occurrence set. Output
/// order is unspecified; callers sort for presentation.
///
/// Indefinite series stop at the earlier of the entry's `until` date and
/// the horizon; the horizon guarantees termination when `until` is
/// absent. Installment counts below 1 are clamped to 1 rather than
/// rejected, keeping aggregate views resilient to partially-corrupt
/// persisted entries.
pub fn expand(entries: &[Entry], horizon_months: u32, today: NaiveDate) -> Vec<Occurrence> {
    let horizon = add_months(today, horizon_months as i32);
    let mut occurrences = Vec::new();

    for entry in entries {
        expand_entry(entry, horizon, &mut occurrences);
    }

    tracing::debug!(
        entries = entries.len(),
        occurrences = occurrences.len(),
        %horizon,
        "expanded entries"
    );
    occurrences
}

fn expand_entry(entry: &Entry, horizon: NaiveDate, out: &mut Vec<Occurrence>) {
    let interval = entry.frequency.interval_months() as i32;

    match entry.recurrence {
        Recurrence::None => {
            // An `until` before the due date means the series already
            // ended; the entry contributes nothing.
            if entry.until.map_or(true, |until| entry.due_date <= until) {
                out.push(occurrence_for(entry, entry.due_date, Some(1), Some(1)));
            }
        }
        Recurrence::Installment => {
            let total = match entry.installments {
                Some(n) if n >= 1 => n,
                other => {
                    tracing::warn!(
                        entry_id = %entry.id,
                        installments = ?other,
                        "installment entry without a valid count, clamping to 1"
                    );
                    1
                }
            };
            // Same cap as the indefinite loop: an absurd persisted count
            // must not drive an unbounded allocation.
            if total as usize > MAX_OCCURRENCES_PER_ENTRY {
                tracing::warn!(
                    entry_id = %entry.id,
                    installments = total,
                    cap = MAX_OCCURRENCES_PER_ENTRY,
                    "installment count exceeds the per-entry cap, truncating"
                );
            }
            let generated = (total as usize).min(MAX_OCCURRENCES_PER_ENTRY) as u32;
            for i in 0..generated {
                let date = add_months(entry.due_date, interval * i as i32);
                if entry.until.is_some_and(|until| date > until) {
                    break;
                }
                let mut occurrence = occurrence_for(entry, date, Some(i + 1), Some(total));
                occurrence.description = format!("{} ({}/{})", entry.description, i + 1, total);
                out.push(occurrence);
            }
        }
        Recurrence::Indefinite => {
            let limit = match entry.until {
                Some(until) => until.min(horizon),
                None => horizon,
            };
            for i in 0..MAX_OCCURRENCES_PER_ENTRY {
                // Stride from the origin each step so a day-31 series
                // returns to day 31 whenever the month allows it.
                let date = add_months(entry.due_date, interval * i as i32);
                if date > limit {
                    break;
                }
                out.push(occurrence_for(entry, date, None, None));
            }
        }
    }
}

fn occurrence_for(
    entry: &Entry,
    date: NaiveDate,
    index: Option<u32>,
    total: Option<u32>,
) -> Occurrence {
    Occurrence {
        id: OccurrenceId::derive(entry.id, date),
        entry_id: entry.id,
        kind: entry.kind,
        description: entry.description.clone(),
        value: entry.value,
        due_date: date,
        index,
        total,
        recurrence: entry.recurrence,
        category: entry.category_or_fallback().to_string(),
    }
}
