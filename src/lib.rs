#![doc(test(attr(deny(warnings))))]

//! Finance Core turns a small set of user-declared financial entries
//! into a deterministic, date-bounded list of occurrences and reduces
//! that list into presentation-ready aggregates. The crate is pure
//! computation: no I/O, no clock reads, no caching. Callers supply
//! entries, skip/payment sets, budgets, and the current date, and
//! re-invoke whenever their state changes.

pub mod errors;
pub mod report;
pub mod schedule;
pub mod utils;

pub use errors::EntryError;
pub use report::{
    accumulated_balance, budget_usage, category_breakdown, is_overdue, month_totals,
    monthly_totals, overdue, payment_status, projected_balance, Budget, BudgetState, BudgetUsage,
    CategoryShare, MonthKey, MonthTotals, PaidSet, PaymentStatus, SkipSet,
};
pub use schedule::{
    expand, Entry, EntryKind, Frequency, Occurrence, OccurrenceId, Recurrence,
    DEFAULT_HORIZON_MONTHS,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
