//! Budget records, cadences, reporting periods, and the explicit state value.

pub mod amount;
pub mod cadence;
pub mod expense;
pub mod income;
pub mod period;
pub mod state;
pub mod transaction;

pub use amount::parse_amount;
pub use cadence::Cadence;
pub use expense::{category_key, ExpenseRecord};
pub use income::IncomeRecord;
pub use period::{DateWindow, DateWindowError, ViewPeriod};
pub use state::BudgetState;
pub use transaction::{Transaction, TransactionKind};
