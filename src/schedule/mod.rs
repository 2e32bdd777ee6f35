//! Entry templates and the occurrence expander.

pub mod entry;
pub mod expand;
pub mod frequency;

pub use entry::{Entry, EntryKind, Recurrence};
pub use expand::{expand, Occurrence, OccurrenceId, DEFAULT_HORIZON_MONTHS};
pub use frequency::{add_months, days_in_month, Frequency};
