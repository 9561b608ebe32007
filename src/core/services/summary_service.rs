use chrono::NaiveDate;

use crate::core::aggregate::{aggregate, summarize_transactions, AggregationMode, BudgetSummary};
use crate::ledger::{BudgetState, Transaction, ViewPeriod};

pub struct SummaryService;

impl SummaryService {
    /// Totals over the recurring income and expense definitions.
    pub fn current_totals(state: &BudgetState, mode: AggregationMode) -> BudgetSummary {
        aggregate(&state.income, &state.expenses, mode)
    }

    /// Dashboard totals in the `view` period over every recorded transaction.
    pub fn dashboard(state: &BudgetState, view: ViewPeriod) -> BudgetSummary {
        summarize_transactions(&state.income, &state.transactions, view, None)
    }

    /// Transactions dated within the `view` period ending on `reference`,
    /// newest first.
    pub fn recent_transactions(
        state: &BudgetState,
        view: ViewPeriod,
        reference: NaiveDate,
    ) -> Vec<&Transaction> {
        let window = view.window_ending(reference);
        let mut recent: Vec<_> = state
            .transactions
            .iter()
            .filter(|transaction| window.contains(transaction.date))
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }

    /// Monthly income left once recurring expenses are covered.
    pub fn remaining_income(state: &BudgetState) -> f64 {
        Self::current_totals(state, AggregationMode::RecurringDefinitions).remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Cadence, ExpenseRecord, IncomeRecord, Transaction};

    fn state() -> BudgetState {
        BudgetState::new()
            .with_income(IncomeRecord::new(1000.0, Cadence::Monthly))
            .with_expense(ExpenseRecord::new(10.0, Cadence::Daily, "coffee"))
            .with_transaction(Transaction::expense(
                45.0,
                "coffee",
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            ))
    }

    #[test]
    fn remaining_income_uses_normalized_expenses() {
        let remaining = SummaryService::remaining_income(&state());
        assert!((remaining - (1000.0 - 304.4)).abs() < 1e-9);
    }

    #[test]
    fn dashboard_totals_cover_all_transactions() {
        let state = state().with_transaction(Transaction::expense(
            500.0,
            "rent",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ));
        let monthly = SummaryService::dashboard(&state, ViewPeriod::Monthly);
        assert_eq!(monthly.total_expenses, 545.0);
        assert_eq!(monthly.by_category.get("rent"), Some(500.0));

        let weekly = SummaryService::dashboard(&state, ViewPeriod::Weekly);
        assert_eq!(weekly.total_expenses, 545.0);
        assert!((weekly.total_income - 1000.0 * 12.0 / 52.0).abs() < 1e-9);
    }

    #[test]
    fn recent_transactions_follow_the_view_window() {
        let state = state().with_transaction(Transaction::expense(
            12.0,
            "lunch",
            NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
        ));
        let reference = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let weekly = SummaryService::recent_transactions(&state, ViewPeriod::Weekly, reference);
        let amounts: Vec<_> = weekly.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(amounts, vec![12.0, 45.0]);

        let later = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert!(SummaryService::recent_transactions(&state, ViewPeriod::Weekly, later).is_empty());
        assert_eq!(
            SummaryService::recent_transactions(&state, ViewPeriod::Monthly, later).len(),
            2
        );
    }
}
