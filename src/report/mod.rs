//! Pure reducers over the expanded occurrence list: monthly totals,
//! running balances, category breakdowns, budget consumption, and
//! overdue/payment status. Every reducer filters by the skip set before
//! totalling, and every time-sensitive one takes its reference date as
//! an explicit parameter.

pub mod breakdown;
pub mod budget;
pub mod flags;
pub mod overdue;
pub mod totals;

pub use breakdown::{category_breakdown, CategoryShare};
pub use budget::{budget_usage, Budget, BudgetState, BudgetUsage};
pub use flags::{PaidSet, SkipSet};
pub use overdue::{is_overdue, overdue, payment_status, PaymentStatus};
pub use totals::{
    accumulated_balance, month_totals, monthly_totals, projected_balance, MonthKey, MonthTotals,
};
