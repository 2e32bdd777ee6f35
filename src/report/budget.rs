use serde::{Deserialize, Serialize};

use super::flags::SkipSet;
use super::totals::MonthKey;
use crate::schedule::{EntryKind, Occurrence};

/// A spending limit for one category in one month. At most one budget
/// per (category, month) is expected; duplicates are summed here rather
/// than policed, last-write-wins being the collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub month: MonthKey,
    pub amount: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, month: MonthKey, amount: f64) -> Self {
        Self {
            category: category.into(),
            month,
            amount,
        }
    }
}

/// Where a category stands against its budget. Replaces the sentinel
/// percentage the UI used to branch on: spending without a budget is
/// `Exceeded`, a budgeted month with no spend is `Within`, and callers
/// branch on the state rather than on a magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    /// No budget set and nothing spent.
    NoBudget,
    /// Spending at or below the warning threshold.
    Within,
    /// Spending at 80% of the budget or above, but not over it.
    Near,
    /// Spending over the budget, or any spending with no budget set.
    Exceeded,
}

const NEAR_THRESHOLD_PCT: f64 = 80.0;

/// One category's consumption against its monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUsage {
    pub category: String,
    pub month: MonthKey,
    pub budgeted: f64,
    pub spent: f64,
    pub state: BudgetState,
}

impl BudgetUsage {
    pub fn remaining(&self) -> f64 {
        self.budgeted - self.spent
    }

    /// Consumption in percent. Always a finite number: zero when no
    /// budget is set, whatever was spent — the `Exceeded` state carries
    /// the overspend signal in that case.
    pub fn percentage(&self) -> f64 {
        if self.budgeted > 0.0 {
            self.spent / self.budgeted * 100.0
        } else {
            0.0
        }
    }
}

fn classify(budgeted: f64, spent: f64) -> BudgetState {
    if budgeted > 0.0 {
        if spent > budgeted {
            BudgetState::Exceeded
        } else if spent / budgeted * 100.0 >= NEAR_THRESHOLD_PCT {
            BudgetState::Near
        } else {
            BudgetState::Within
        }
    } else if spent > 0.0 {
        BudgetState::Exceeded
    } else {
        BudgetState::NoBudget
    }
}

fn severity(state: BudgetState) -> u8 {
    match state {
        BudgetState::Exceeded => 3,
        BudgetState::Near => 2,
        BudgetState::Within => 1,
        BudgetState::NoBudget => 0,
    }
}

/// Consumption for every category that has either a budget or expense
/// spending in the given month, most consumed first.
pub fn budget_usage(
    occurrences: &[Occurrence],
    skips: &SkipSet,
    budgets: &[Budget],
    month: MonthKey,
) -> Vec<BudgetUsage> {
    let mut usages: Vec<BudgetUsage> = Vec::new();

    for budget in budgets.iter().filter(|b| b.month == month) {
        match usages.iter_mut().find(|u| u.category == budget.category) {
            Some(usage) => usage.budgeted += budget.amount,
            None => usages.push(BudgetUsage {
                category: budget.category.clone(),
                month,
                budgeted: budget.amount,
                spent: 0.0,
                state: BudgetState::NoBudget,
            }),
        }
    }

    for occurrence in occurrences {
        if occurrence.kind != EntryKind::Expense
            || skips.contains(&occurrence.id)
            || MonthKey::of(occurrence.due_date) != month
        {
            continue;
        }
        match usages.iter_mut().find(|u| u.category == occurrence.category) {
            Some(usage) => usage.spent += occurrence.value,
            None => usages.push(BudgetUsage {
                category: occurrence.category.clone(),
                month,
                budgeted: 0.0,
                spent: occurrence.value,
                state: BudgetState::NoBudget,
            }),
        }
    }

    for usage in usages.iter_mut() {
        usage.state = classify(usage.budgeted, usage.spent);
    }
    usages.sort_by(|a, b| {
        severity(b.state)
            .cmp(&severity(a.state))
            .then_with(|| b.percentage().total_cmp(&a.percentage()))
            .then_with(|| a.category.cmp(&b.category))
    });
    usages
}
