#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_engine::ledger::{BudgetState, Cadence, ExpenseRecord, IncomeRecord};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// 4000 monthly income; food 100 weekly; transport 50 daily.
pub fn scenario_state() -> BudgetState {
    BudgetState::new()
        .with_income(IncomeRecord::new(4000.0, Cadence::Monthly).with_description("salary"))
        .with_expense(ExpenseRecord::new(100.0, Cadence::Weekly, "food"))
        .with_expense(ExpenseRecord::new(50.0, Cadence::Daily, "transport"))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
