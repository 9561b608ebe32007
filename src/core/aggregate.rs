//! Reduction of income and expense collections into summary totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::normalize::convert_for_view;
use crate::ledger::{
    category_key, DateWindow, ExpenseRecord, IncomeRecord, Transaction, ViewPeriod,
};

/// How expense amounts are read when totalling.
///
/// Recurring expense definitions are normalized to a monthly figure; dated
/// transactions already carry an amount for their own period and are summed
/// as recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    #[default]
    RecurringDefinitions,
    DatedTransactions,
}

impl AggregationMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recurring" | "recurring_definitions" => Some(AggregationMode::RecurringDefinitions),
            "transactions" | "dated" | "dated_transactions" => {
                Some(AggregationMode::DatedTransactions)
            }
            _ => None,
        }
    }

    pub fn expense_amount(&self, record: &ExpenseRecord) -> f64 {
        match self {
            AggregationMode::RecurringDefinitions => record.monthly_amount(),
            AggregationMode::DatedTransactions => record.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Case-normalized grouping key.
    pub category: String,
    /// Spelling of the first record seen for this category.
    pub label: String,
    pub amount: f64,
}

/// Per-category totals in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, amount: f64) {
        let key = category_key(label);
        match self.entries.iter_mut().find(|entry| entry.category == key) {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal {
                category: key,
                label: label.trim().to_string(),
                amount,
            }),
        }
    }

    /// Total for `category`, matched case-insensitively.
    pub fn get(&self, category: &str) -> Option<f64> {
        let key = category_key(category);
        self.entries
            .iter()
            .find(|entry| entry.category == key)
            .map(|entry| entry.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    /// Percentage of the breakdown total spent in `category`; 0 when nothing
    /// was spent at all.
    pub fn share(&self, category: &str) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        self.get(category).unwrap_or(0.0) / total * 100.0
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.category.clone(), entry.amount))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub by_category: CategoryBreakdown,
    pub mode: AggregationMode,
}

impl BudgetSummary {
    /// Income left after expenses; negative when overspending.
    pub fn remaining(&self) -> f64 {
        self.balance
    }
}

pub fn total_monthly_income(records: &[IncomeRecord]) -> f64 {
    records.iter().map(IncomeRecord::monthly_amount).sum()
}

pub fn total_expenses(records: &[ExpenseRecord], mode: AggregationMode) -> f64 {
    records.iter().map(|record| mode.expense_amount(record)).sum()
}

pub fn by_category(records: &[ExpenseRecord], mode: AggregationMode) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::new();
    for record in records {
        breakdown.add(&record.category, mode.expense_amount(record));
    }
    breakdown
}

pub fn aggregate(
    income: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    mode: AggregationMode,
) -> BudgetSummary {
    let total_income = total_monthly_income(income);
    let total_expenses = total_expenses(expenses, mode);
    let by_category = by_category(expenses, mode);
    tracing::debug!(
        income = income.len(),
        expenses = expenses.len(),
        categories = by_category.len(),
        ?mode,
        "aggregated budget records"
    );
    BudgetSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        by_category,
        mode,
    }
}

/// Dashboard totals over dated transactions.
///
/// Income sources and income transactions are expressed in the `view`
/// period; expense transactions are summed as recorded. When `window` is
/// given only transactions dated inside it are counted.
pub fn summarize_transactions(
    sources: &[IncomeRecord],
    transactions: &[Transaction],
    view: ViewPeriod,
    window: Option<DateWindow>,
) -> BudgetSummary {
    let in_window = |transaction: &&Transaction| {
        window.map_or(true, |window| window.contains(transaction.date))
    };

    let from_sources: f64 = sources
        .iter()
        .map(|source| convert_for_view(source.amount, Some(&source.cadence), view))
        .sum();
    let from_transactions: f64 = transactions
        .iter()
        .filter(in_window)
        .filter(|transaction| transaction.is_income())
        .map(|transaction| {
            convert_for_view(transaction.amount, transaction.cadence.as_ref(), view)
        })
        .sum();

    let mut by_category = CategoryBreakdown::new();
    let mut total_expenses = 0.0;
    for transaction in transactions
        .iter()
        .filter(in_window)
        .filter(|transaction| transaction.is_expense())
    {
        total_expenses += transaction.amount;
        by_category.add(&transaction.category, transaction.amount);
    }

    let total_income = from_sources + from_transactions;
    BudgetSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        by_category,
        mode: AggregationMode::DatedTransactions,
    }
}
