use chrono::NaiveDate;

use crate::core::aggregate::{total_expenses, total_monthly_income, AggregationMode};
use crate::core::projection::{
    project_savings, to_records, ProjectionPoint, SavingsProjectionRecord,
};
use crate::ledger::BudgetState;

pub struct ProjectionService;

impl ProjectionService {
    /// Projects savings from the state's recurring definitions.
    pub fn project(
        state: &BudgetState,
        horizon_months: u32,
        start: NaiveDate,
    ) -> Vec<ProjectionPoint> {
        let income = total_monthly_income(&state.income);
        let expenses = total_expenses(&state.expenses, AggregationMode::RecurringDefinitions);
        let points = project_savings(income, expenses, horizon_months, start);
        tracing::debug!(
            monthly_income = income,
            monthly_expenses = expenses,
            points = points.len(),
            "projected savings"
        );
        points
    }

    pub fn records(
        state: &BudgetState,
        user_id: &str,
        horizon_months: u32,
        start: NaiveDate,
    ) -> Vec<SavingsProjectionRecord> {
        to_records(user_id, &Self::project(state, horizon_months, start))
    }
}
