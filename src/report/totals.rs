use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::flags::SkipSet;
use crate::schedule::frequency::days_in_month;
use crate::schedule::{EntryKind, Occurrence};

/// A calendar month, the bucket every monthly reducer partitions by.
/// Renders and parses as `YYYY-MM`, the format budgets are keyed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap())
    }

    pub fn last_day(&self) -> NaiveDate {
        let day = days_in_month(self.year, self.month);
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.first_day())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid month key: {s}"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("invalid month key: {s}"))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| format!("invalid month key: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("invalid month key: {s}"));
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Income and expense sums for one month of non-skipped occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    fn absorb(&mut self, occurrence: &Occurrence) {
        match occurrence.kind {
            EntryKind::Income => self.income += occurrence.value,
            EntryKind::Expense => self.expense += occurrence.value,
        }
    }
}

/// Totals for a single month.
pub fn month_totals(occurrences: &[Occurrence], skips: &SkipSet, month: MonthKey) -> MonthTotals {
    let mut totals = MonthTotals::default();
    for occurrence in occurrences {
        if skips.contains(&occurrence.id) {
            continue;
        }
        if MonthKey::of(occurrence.due_date) == month {
            totals.absorb(occurrence);
        }
    }
    totals
}

/// Totals for every month touched by a non-skipped occurrence, in
/// chronological order. Backs trend views over the whole expansion.
pub fn monthly_totals(occurrences: &[Occurrence], skips: &SkipSet) -> BTreeMap<MonthKey, MonthTotals> {
    let mut totals: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    for occurrence in occurrences {
        if skips.contains(&occurrence.id) {
            continue;
        }
        totals
            .entry(MonthKey::of(occurrence.due_date))
            .or_default()
            .absorb(occurrence);
    }
    totals
}

/// Signed balance (income positive, expense negative) over every
/// non-skipped occurrence due on or before `as_of`.
///
/// Only complete when the expansion's horizon covers `as_of`; with a
/// shorter horizon the result silently undercounts the tail.
pub fn accumulated_balance(occurrences: &[Occurrence], skips: &SkipSet, as_of: NaiveDate) -> f64 {
    occurrences
        .iter()
        .filter(|o| o.due_date <= as_of && !skips.contains(&o.id))
        .map(signed_value)
        .sum()
}

/// Signed balance over the entire expansion, the "final projection" at
/// the horizon's edge.
pub fn projected_balance(occurrences: &[Occurrence], skips: &SkipSet) -> f64 {
    occurrences
        .iter()
        .filter(|o| !skips.contains(&o.id))
        .map(signed_value)
        .sum()
}

fn signed_value(occurrence: &Occurrence) -> f64 {
    match occurrence.kind {
        EntryKind::Income => occurrence.value,
        EntryKind::Expense => -occurrence.value,
    }
}
