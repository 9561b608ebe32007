pub mod json_backend;

use crate::{core::projection::SavingsProjectionRecord, errors::EngineError, ledger::BudgetState};

pub type Result<T> = std::result::Result<T, EngineError>;

/// Persistence collaborator keyed by an opaque user identifier.
///
/// The engine never calls a store; callers sync the state after each
/// transition.
pub trait StateStore: Send + Sync {
    fn save(&self, user_id: &str, state: &BudgetState) -> Result<()>;
    fn load(&self, user_id: &str) -> Result<Option<BudgetState>>;
    fn save_projections(&self, user_id: &str, records: &[SavingsProjectionRecord]) -> Result<()>;
    fn load_projections(&self, user_id: &str) -> Result<Vec<SavingsProjectionRecord>>;
    fn users(&self) -> Result<Vec<String>>;
}

pub use json_backend::{load_state_from_path, save_state_to_path, state_warnings, JsonStorage};
