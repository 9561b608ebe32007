#![doc(test(attr(deny(warnings))))]

//! Budget Engine turns cadence-tagged income and expense records into
//! monthly totals, category breakdowns, and forward savings projections.
//!
//! ```
//! use budget_engine::core::{aggregate, AggregationMode};
//! use budget_engine::ledger::{Cadence, ExpenseRecord, IncomeRecord};
//!
//! let income = [IncomeRecord::new(4000.0, Cadence::Monthly)];
//! let expenses = [ExpenseRecord::new(50.0, Cadence::Daily, "transport")];
//! let summary = aggregate(&income, &expenses, AggregationMode::RecurringDefinitions);
//! assert!((summary.balance - 2478.0).abs() < 1e-9);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "budget engine initialized");
    });
}
