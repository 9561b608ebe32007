use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{expense::ExpenseRecord, income::IncomeRecord, transaction::Transaction};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Snapshot of everything a user has entered.
///
/// Transitions consume the state and hand back the next one, so callers
/// always hold a consistent value to pass into the engine and to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetState {
    #[serde(default)]
    pub income: Vec<IncomeRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BudgetState::schema_version_default")]
    pub schema_version: u8,
}

impl Default for BudgetState {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetState {
    pub fn new() -> Self {
        Self {
            income: Vec::new(),
            expenses: Vec::new(),
            transactions: Vec::new(),
            updated_at: Utc::now(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn with_income(mut self, record: IncomeRecord) -> Self {
        self.income.push(record);
        self.touched()
    }

    pub fn with_expense(mut self, record: ExpenseRecord) -> Self {
        self.expenses.push(record);
        self.touched()
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self.touched()
    }

    pub fn without_income(mut self, id: Uuid) -> Self {
        self.income.retain(|record| record.id != id);
        self.touched()
    }

    pub fn without_expense(mut self, id: Uuid) -> Self {
        self.expenses.retain(|record| record.id != id);
        self.touched()
    }

    pub fn without_transaction(mut self, id: Uuid) -> Self {
        self.transactions.retain(|transaction| transaction.id != id);
        self.touched()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty() && self.transactions.is_empty()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn touched(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }
}
