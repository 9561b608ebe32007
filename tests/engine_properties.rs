mod common;

use budget_engine::{
    core::{
        aggregate, charts, normalize_to_monthly, project_savings,
        services::{ProjectionService, SummaryService},
        AggregationMode,
    },
    ledger::{Cadence, ExpenseRecord, IncomeRecord, Transaction, ViewPeriod},
};
use chrono::NaiveDate;
use common::{assert_close, scenario_state};

const MODES: [AggregationMode; 2] = [
    AggregationMode::RecurringDefinitions,
    AggregationMode::DatedTransactions,
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_cadence_is_identity() {
    for amount in [0.0, 0.01, 99.99, 4000.0, 123_456.78] {
        assert_eq!(normalize_to_monthly(amount, &Cadence::Monthly), amount);
    }
}

#[test]
fn daily_and_weekly_constants() {
    assert_eq!(normalize_to_monthly(1.0, &Cadence::Daily), 30.44);
    assert_eq!(normalize_to_monthly(1.0, &Cadence::Weekly), 4.35);
}

#[test]
fn empty_collections_aggregate_to_zero() {
    for mode in MODES {
        let summary = aggregate(&[], &[], mode);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert!(summary.by_category.to_map().is_empty());
    }
}

#[test]
fn category_breakdown_partitions_total() {
    let expenses = vec![
        ExpenseRecord::new(12.5, Cadence::Daily, "Food"),
        ExpenseRecord::new(80.0, Cadence::Weekly, "fuel"),
        ExpenseRecord::new(1200.0, Cadence::Monthly, "Rent"),
        ExpenseRecord::new(7.25, Cadence::Daily, "FOOD"),
        ExpenseRecord::new(15.0, Cadence::Unrecognized("yearly".into()), "misc"),
    ];
    for mode in MODES {
        let summary = aggregate(&[], &expenses, mode);
        let sum: f64 = summary.by_category.to_map().values().sum();
        assert_close(sum, summary.total_expenses);
        assert_eq!(summary.by_category.len(), 4);
    }
}

#[test]
fn linear_projection_for_first_half_of_2024() {
    let points = project_savings(2000.0, 1500.0, 6, date(2024, 1, 1));
    assert_eq!(points.len(), 6);
    for (idx, point) in points.iter().enumerate() {
        assert_eq!(point.month, date(2024, idx as u32 + 1, 1));
        assert_eq!(point.cumulative_amount, 500.0 * (idx as f64 + 1.0));
    }
}

#[test]
fn overspending_projection_strictly_decreases() {
    let points = project_savings(1800.0, 2300.5, 6, date(2024, 9, 14));
    assert!(points[0].cumulative_amount < 0.0);
    for pair in points.windows(2) {
        assert!(pair[1].cumulative_amount < pair[0].cumulative_amount);
    }
}

#[test]
fn documented_scenario_totals() {
    let state = scenario_state();
    let summary = SummaryService::current_totals(&state, AggregationMode::RecurringDefinitions);
    assert_close(summary.total_income, 4000.0);
    assert_close(summary.by_category.get("food").unwrap(), 435.0);
    assert_close(summary.by_category.get("transport").unwrap(), 1522.0);
    assert_close(summary.balance, 2043.0);
    assert_close(SummaryService::remaining_income(&state), 2043.0);
}

#[test]
fn aggregate_is_idempotent() {
    let state = scenario_state();
    let first = aggregate(&state.income, &state.expenses, AggregationMode::RecurringDefinitions);
    let second = aggregate(&state.income, &state.expenses, AggregationMode::RecurringDefinitions);
    assert_eq!(first, second);
    assert_eq!(first.balance.to_bits(), second.balance.to_bits());
}

#[test]
fn setup_path_normalizes_expense_definitions() {
    let state = scenario_state();
    let summary = SummaryService::current_totals(&state, AggregationMode::RecurringDefinitions);
    assert_close(summary.total_expenses, 1957.0);
}

#[test]
fn transaction_path_sums_amounts_as_entered() {
    let state = scenario_state();
    let summary = SummaryService::current_totals(&state, AggregationMode::DatedTransactions);
    assert_close(summary.total_expenses, 150.0);
    assert_close(summary.balance, 3850.0);
}

#[test]
fn dashboard_converts_income_to_view() {
    let state = scenario_state()
        .with_transaction(
            Transaction::income(300.0, "freelance", date(2024, 4, 10)).with_cadence(Cadence::Weekly),
        )
        .with_transaction(Transaction::expense(80.0, "Food", date(2024, 4, 11)))
        .with_transaction(Transaction::expense(20.0, "fun", date(2024, 4, 12)));

    let monthly = SummaryService::dashboard(&state, ViewPeriod::Monthly);
    assert_close(monthly.total_income, 4000.0 + 300.0 * 52.0 / 12.0);
    assert_close(monthly.total_expenses, 100.0);
    assert_close(monthly.by_category.share("food"), 80.0);

    let weekly = SummaryService::dashboard(&state, ViewPeriod::Weekly);
    assert_close(weekly.total_income, 4000.0 * 12.0 / 52.0 + 300.0);
}

#[test]
fn projection_records_and_charts_follow_state() {
    let state = scenario_state();
    let records = ProjectionService::records(&state, "demo", 6, date(2024, 11, 20));
    let months: Vec<_> = records.iter().map(|record| record.month.as_str()).collect();
    assert_eq!(
        months,
        vec!["2024-11", "2024-12", "2025-01", "2025-02", "2025-03", "2025-04"]
    );
    assert_close(records[5].projected_amount, 2043.0 * 6.0);

    let points = ProjectionService::project(&state, 6, date(2024, 11, 20));
    let bars = charts::savings_bars(&points);
    assert_eq!(bars[2].month, "Jan");

    let summary = aggregate(
        &[IncomeRecord::new(1.0, Cadence::Monthly)],
        &state.expenses,
        AggregationMode::RecurringDefinitions,
    );
    let slices = charts::category_slices(&summary.by_category);
    assert_eq!(slices[0].name, "food");
    assert_eq!(slices[1].fill, charts::PALETTE[1]);
}
