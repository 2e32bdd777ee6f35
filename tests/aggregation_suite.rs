use chrono::{NaiveDate, TimeZone, Utc};
use finance_core::report::{
    accumulated_balance, budget_usage, category_breakdown, is_overdue, month_totals,
    monthly_totals, overdue, payment_status, projected_balance, Budget, BudgetState, MonthKey,
    PaidSet, SkipSet,
};
use finance_core::schedule::{expand, Entry, EntryKind, Frequency, Recurrence};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(kind: EntryKind, description: &str, value: f64, due: NaiveDate) -> Entry {
    Entry::new(
        kind,
        description,
        value,
        due,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}

fn household() -> Vec<Entry> {
    vec![
        entry(EntryKind::Income, "Salary", 5000.0, ymd(2024, 1, 5))
            .with_recurrence(Recurrence::Indefinite, Frequency::Monthly)
            .with_category("salary"),
        entry(EntryKind::Expense, "Rent", 1500.0, ymd(2024, 1, 1))
            .with_recurrence(Recurrence::Indefinite, Frequency::Monthly)
            .with_category("housing"),
        entry(EntryKind::Expense, "Groceries", 800.0, ymd(2024, 1, 12))
            .with_recurrence(Recurrence::Indefinite, Frequency::Monthly)
            .with_category("food"),
        entry(EntryKind::Expense, "Sofa", 250.0, ymd(2024, 2, 20)).with_installments(4),
    ]
}

#[test]
fn month_totals_split_by_kind_and_respect_skips() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let march = MonthKey::new(2024, 3);

    let totals = month_totals(&occurrences, &SkipSet::new(), march);
    assert_eq!(totals.income, 5000.0);
    assert_eq!(totals.expense, 1500.0 + 800.0 + 250.0);
    assert_eq!(totals.balance(), 5000.0 - 2550.0);

    // Skipping the March sofa installment removes it from the totals.
    let sofa_march = occurrences
        .iter()
        .find(|o| o.due_date == ymd(2024, 3, 20))
        .unwrap();
    let skips: SkipSet = [sofa_march.id.clone()].into_iter().collect();
    let totals = month_totals(&occurrences, &skips, march);
    assert_eq!(totals.expense, 1500.0 + 800.0);
}

#[test]
fn monthly_balances_sum_to_accumulated_delta() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let skips = SkipSet::new();

    let year_sum: f64 = monthly_totals(&occurrences, &skips)
        .iter()
        .filter(|(month, _)| month.year == 2024)
        .map(|(_, totals)| totals.balance())
        .sum();
    let delta = accumulated_balance(&occurrences, &skips, ymd(2024, 12, 31))
        - accumulated_balance(&occurrences, &skips, ymd(2023, 12, 31));
    assert!((year_sum - delta).abs() < 1e-9);
}

#[test]
fn projected_balance_covers_whole_expansion() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let skips = SkipSet::new();

    let projected = projected_balance(&occurrences, &skips);
    let at_horizon_edge = accumulated_balance(&occurrences, &skips, ymd(2100, 1, 1));
    assert!((projected - at_horizon_edge).abs() < 1e-9);
}

#[test]
fn accumulated_balance_is_date_inclusive() {
    let entries = vec![entry(EntryKind::Income, "Bonus", 100.0, ymd(2024, 6, 15))];
    let occurrences = expand(&entries, 12, ymd(2024, 1, 1));
    let skips = SkipSet::new();

    assert_eq!(accumulated_balance(&occurrences, &skips, ymd(2024, 6, 14)), 0.0);
    assert_eq!(accumulated_balance(&occurrences, &skips, ymd(2024, 6, 15)), 100.0);
}

#[test]
fn category_breakdown_shares_sum_to_hundred() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let march = MonthKey::new(2024, 3);

    let shares = category_breakdown(&occurrences, &SkipSet::new(), EntryKind::Expense, march);
    assert_eq!(shares.len(), 3);
    // Sorted largest first: housing 1500, food 800, sofa (uncategorized) 250.
    assert_eq!(shares[0].category, "housing");
    assert_eq!(shares[1].category, "food");
    assert_eq!(shares[2].category, "other_expense");
    let total_share: f64 = shares.iter().map(|s| s.share).sum();
    assert!((total_share - 100.0).abs() < 1e-9);
}

#[test]
fn category_breakdown_of_empty_month_has_no_shares() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let shares = category_breakdown(
        &occurrences,
        &SkipSet::new(),
        EntryKind::Expense,
        MonthKey::new(2019, 1),
    );
    assert!(shares.is_empty());
}

#[test]
fn budget_usage_classifies_each_state() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let march = MonthKey::new(2024, 3);
    let budgets = vec![
        Budget::new("housing", march, 2000.0), // 1500 / 2000 = 75% -> Within
        Budget::new("food", march, 900.0),     // 800 / 900 ~ 89% -> Near
        Budget::new("travel", march, 300.0),   // no spend -> Within at 0%
    ];

    let usages = budget_usage(&occurrences, &SkipSet::new(), &budgets, march);
    let state_of = |category: &str| {
        usages
            .iter()
            .find(|u| u.category == category)
            .map(|u| u.state)
            .unwrap()
    };

    assert_eq!(state_of("housing"), BudgetState::Within);
    assert_eq!(state_of("food"), BudgetState::Near);
    assert_eq!(state_of("travel"), BudgetState::Within);
    // Sofa spending has no budget at all: Exceeded with a finite percentage.
    assert_eq!(state_of("other_expense"), BudgetState::Exceeded);
    let sofa = usages.iter().find(|u| u.category == "other_expense").unwrap();
    assert_eq!(sofa.percentage(), 0.0);
    assert!(sofa.percentage().is_finite());

    // Most severe state sorts first.
    assert_eq!(usages[0].category, "other_expense");
}

#[test]
fn budget_usage_over_budget_is_exceeded() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let march = MonthKey::new(2024, 3);
    let budgets = vec![Budget::new("housing", march, 1000.0)];

    let usages = budget_usage(&occurrences, &SkipSet::new(), &budgets, march);
    let housing = usages.iter().find(|u| u.category == "housing").unwrap();
    assert_eq!(housing.state, BudgetState::Exceeded);
    assert_eq!(housing.remaining(), -500.0);
    assert!((housing.percentage() - 150.0).abs() < 1e-9);
}

#[test]
fn budget_usage_ignores_other_months() {
    let occurrences = expand(&household(), 24, ymd(2024, 1, 1));
    let budgets = vec![Budget::new("housing", MonthKey::new(2024, 4), 2000.0)];

    let usages = budget_usage(&occurrences, &SkipSet::new(), &budgets, MonthKey::new(2024, 3));
    let housing = usages.iter().find(|u| u.category == "housing").unwrap();
    assert_eq!(housing.budgeted, 0.0);
    assert_eq!(housing.state, BudgetState::Exceeded);
}

#[test]
fn overdue_needs_past_due_date_and_no_payment() {
    let entries = vec![
        entry(EntryKind::Expense, "Past", 10.0, ymd(2024, 3, 1)),
        entry(EntryKind::Expense, "Today", 10.0, ymd(2024, 3, 15)),
        entry(EntryKind::Expense, "Future", 10.0, ymd(2024, 3, 20)),
    ];
    let occurrences = expand(&entries, 12, ymd(2024, 1, 1));
    let today = ymd(2024, 3, 15);
    let skips = SkipSet::new();

    let mut paid = PaidSet::new();
    let late = overdue(&occurrences, &skips, today, &paid);
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].due_date, ymd(2024, 3, 1));

    // Paying the past occurrence clears it.
    paid.insert(late[0].id.clone());
    assert!(overdue(&occurrences, &skips, today, &paid).is_empty());
    assert!(!is_overdue(&occurrences[1], &skips, today, &paid));
}

#[test]
fn skipped_occurrences_are_neither_overdue_nor_pending() {
    let entries = vec![entry(EntryKind::Expense, "Cancelled fee", 30.0, ymd(2024, 3, 1))];
    let occurrences = expand(&entries, 12, ymd(2024, 1, 1));
    let today = ymd(2024, 3, 15);
    let paid = PaidSet::new();

    let skips = SkipSet::new();
    assert_eq!(overdue(&occurrences, &skips, today, &paid).len(), 1);
    assert_eq!(payment_status(&occurrences, &skips, &paid).pending, 1);

    // Deleting the occurrence removes it from both reports.
    let skips: SkipSet = occurrences.iter().map(|o| o.id.clone()).collect();
    assert!(overdue(&occurrences, &skips, today, &paid).is_empty());
    assert!(!is_overdue(&occurrences[0], &skips, today, &paid));
    let status = payment_status(&occurrences, &skips, &paid);
    assert_eq!(status.paid, 0);
    assert_eq!(status.pending, 0);
}

#[test]
fn payment_status_counts_paid_and_pending() {
    let occurrences = expand(&household(), 2, ymd(2024, 1, 1));
    let paid: PaidSet = occurrences.iter().take(2).map(|o| o.id.clone()).collect();

    let status = payment_status(&occurrences, &SkipSet::new(), &paid);
    assert_eq!(status.paid, 2);
    assert_eq!(status.pending, occurrences.len() - 2);
}

#[test]
fn ending_an_indefinite_series_keeps_earlier_occurrences() {
    let mut e = entry(EntryKind::Expense, "Gym", 80.0, ymd(2024, 1, 20))
        .with_recurrence(Recurrence::Indefinite, Frequency::Monthly);
    let today = ymd(2024, 1, 1);

    let occurrences = expand(std::slice::from_ref(&e), 12, today);
    let picked = occurrences
        .iter()
        .find(|o| o.due_date == ymd(2024, 4, 20))
        .unwrap();
    e.end_series_at(picked);
    assert_eq!(e.until, Some(ymd(2024, 4, 20)));

    let after: Vec<_> = expand(&[e], 12, today).iter().map(|o| o.due_date).collect();
    assert_eq!(
        after,
        vec![ymd(2024, 1, 20), ymd(2024, 2, 20), ymd(2024, 3, 20), ymd(2024, 4, 20)]
    );
}

#[test]
fn ending_an_installment_series_truncates_the_count() {
    let mut e = entry(EntryKind::Expense, "Sofa", 250.0, ymd(2024, 2, 20)).with_installments(4);
    let today = ymd(2024, 1, 1);

    let occurrences = expand(std::slice::from_ref(&e), 12, today);
    let second = occurrences.iter().find(|o| o.index == Some(2)).unwrap();
    e.end_series_at(second);
    assert_eq!(e.installments, Some(2));

    let after = expand(&[e], 12, today);
    assert_eq!(after.len(), 2);
    assert_eq!(after.last().unwrap().description, "Sofa (2/2)");
}

#[test]
fn domain_types_round_trip_through_serde() {
    let e = entry(EntryKind::Expense, "Rent", 1500.0, ymd(2024, 1, 1))
        .with_recurrence(Recurrence::Indefinite, Frequency::Monthly)
        .with_category("housing")
        .with_until(ymd(2025, 1, 1));
    let json = serde_json::to_string(&e).unwrap();
    let back: Entry = serde_json::from_str(&json).unwrap();
    assert_eq!(serde_json::to_value(&e).unwrap(), serde_json::to_value(&back).unwrap());

    let budget = Budget::new("housing", MonthKey::new(2024, 3), 2000.0);
    let value = serde_json::to_value(&budget).unwrap();
    assert_eq!(value["month"], "2024-03");
    let back: Budget = serde_json::from_value(value).unwrap();
    assert_eq!(back, budget);

    let occurrences = expand(std::slice::from_ref(&e), 3, ymd(2024, 1, 1));
    let skips: SkipSet = occurrences.iter().map(|o| o.id.clone()).collect();
    let json = serde_json::to_string(&skips).unwrap();
    let back: SkipSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, skips);
}
