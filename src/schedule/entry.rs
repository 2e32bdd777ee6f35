use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expand::Occurrence;
use super::frequency::Frequency;
use crate::errors::EntryError;

/// Direction of money flow for an entry and its occurrences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Catalog id used when an occurrence has no (or an unknown) category.
    pub fn fallback_category(&self) -> &'static str {
        match self {
            EntryKind::Income => "other_income",
            EntryKind::Expense => "other_expense",
        }
    }
}

/// How an entry repeats over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// A single occurrence on the due date.
    #[default]
    None,
    /// Repeats every frequency interval until `until` or the horizon.
    Indefinite,
    /// A fixed number of installments, one per frequency interval.
    Installment,
}

/// A user-declared financial event template. Entries are the persisted
/// input; dated occurrences are derived from them on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub description: String,
    pub value: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        description: impl Into<String>,
        value: f64,
        due_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            description: description.into(),
            value,
            due_date,
            recurrence: Recurrence::None,
            frequency: Frequency::Monthly,
            installments: None,
            until: None,
            category: None,
            created_at,
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence, frequency: Frequency) -> Self {
        self.recurrence = recurrence;
        self.frequency = frequency;
        self
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.recurrence = Recurrence::Installment;
        self.installments = Some(count);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Boundary validation, run before an entry reaches the expander.
    /// `until` earlier than the due date is deliberately not an error:
    /// such a series has simply already ended and expands to nothing.
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.description.trim().is_empty() {
            return Err(EntryError::EmptyDescription);
        }
        if !(self.value > 0.0) {
            return Err(EntryError::NonPositiveValue(self.value));
        }
        if self.recurrence == Recurrence::Installment
            && self.installments.map_or(true, |n| n < 1)
        {
            return Err(EntryError::MissingInstallments);
        }
        Ok(())
    }

    /// Category id carried onto occurrences, with the per-kind fallback
    /// applied for missing or blank references.
    pub fn category_or_fallback(&self) -> &str {
        match self.category.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => self.kind.fallback_category(),
        }
    }

    /// Ends the series at the given occurrence: later occurrences vanish
    /// on the next expansion, earlier ones remain.
    ///
    /// Indefinite entries get their `until` pinned to the occurrence
    /// date; installment entries get their count truncated to the
    /// occurrence's 1-based index. One-shot entries are left untouched.
    pub fn end_series_at(&mut self, occurrence: &Occurrence) {
        match self.recurrence {
            Recurrence::Indefinite => {
                self.until = Some(occurrence.due_date);
            }
            Recurrence::Installment => {
                let index = occurrence.index.unwrap_or(1).max(1);
                self.installments = Some(index);
            }
            Recurrence::None => {}
        }
    }
}
