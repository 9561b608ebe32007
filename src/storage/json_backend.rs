use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    core::{
        projection::SavingsProjectionRecord,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    errors::EngineError,
    ledger::{BudgetState, Cadence},
};

use super::{Result, StateStore};

const FILE_EXTENSION: &str = "json";

/// Stores each user's state and projections as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    states_dir: PathBuf,
    projections_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let states_dir = PathResolver::states_dir_in(&app_root);
        let projections_dir = PathResolver::projections_dir_in(&app_root);
        ensure_dir(&states_dir)?;
        ensure_dir(&projections_dir)?;
        Ok(Self {
            root: app_root,
            states_dir,
            projections_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn state_path(&self, user_id: &str) -> Result<PathBuf> {
        Ok(self.states_dir.join(file_name(user_id)?))
    }

    pub fn projections_path(&self, user_id: &str) -> Result<PathBuf> {
        Ok(self.projections_dir.join(file_name(user_id)?))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StateStore for JsonStorage {
    fn save(&self, user_id: &str, state: &BudgetState) -> Result<()> {
        let path = self.state_path(user_id)?;
        write_json(&path, state)?;
        tracing::info!(user = user_id, path = %path.display(), "budget state saved");
        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<BudgetState>> {
        let path = self.state_path(user_id)?;
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn save_projections(&self, user_id: &str, records: &[SavingsProjectionRecord]) -> Result<()> {
        write_json(&self.projections_path(user_id)?, records)
    }

    fn load_projections(&self, user_id: &str) -> Result<Vec<SavingsProjectionRecord>> {
        let path = self.projections_path(user_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    fn users(&self) -> Result<Vec<String>> {
        let mut users = Vec::new();
        for entry in fs::read_dir(&self.states_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match urlencoding::decode(stem) {
                Ok(user) => users.push(user.into_owned()),
                Err(_) => tracing::warn!(path = %path.display(), "skipping undecodable state file"),
            }
        }
        users.sort();
        Ok(users)
    }
}

pub fn save_state_to_path(state: &BudgetState, path: &Path) -> Result<()> {
    write_json(path, state)
}

pub fn load_state_from_path(path: &Path) -> Result<BudgetState> {
    read_json(path)
}

/// Problems worth surfacing after loading a state written by another tool.
pub fn state_warnings(state: &BudgetState) -> Vec<String> {
    let mut warnings = Vec::new();
    for record in &state.income {
        check_entry(&mut warnings, "income", record.id, record.amount, Some(&record.cadence));
    }
    for record in &state.expenses {
        check_entry(&mut warnings, "expense", record.id, record.amount, Some(&record.cadence));
    }
    for transaction in &state.transactions {
        check_entry(
            &mut warnings,
            "transaction",
            transaction.id,
            transaction.amount,
            transaction.cadence.as_ref(),
        );
    }
    warnings
}

fn check_entry(
    warnings: &mut Vec<String>,
    kind: &str,
    id: Uuid,
    amount: f64,
    cadence: Option<&Cadence>,
) {
    if let Some(cadence) = cadence.filter(|cadence| !cadence.is_recognized()) {
        warnings.push(format!(
            "{kind} {id} has unrecognized cadence `{cadence}`; treated as monthly"
        ));
    }
    if amount.is_nan() || amount < 0.0 {
        warnings.push(format!("{kind} {id} has invalid amount {amount}"));
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Percent-encodes the user id so distinct ids never share a file.
fn file_name(user_id: &str) -> Result<String> {
    if user_id.is_empty() {
        return Err(EngineError::InvalidInput("user id must not be empty".into()));
    }
    Ok(format!("{}.{}", urlencoding::encode(user_id), FILE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{IncomeRecord, Transaction};
    use chrono::NaiveDate;

    #[test]
    fn file_names_keep_distinct_ids_apart() {
        let ids = [
            "Alice Smith",
            "alice smith",
            "alice_smith",
            "alice.smith",
            "ALICE SMITH",
            "../",
            "___",
            "default",
        ];
        let names: Vec<_> = ids.iter().map(|id| file_name(id).unwrap()).collect();
        for (idx, name) in names.iter().enumerate() {
            assert!(!name.contains('/'), "{name} escapes the directory");
            assert_eq!(names.iter().filter(|other| *other == name).count(), 1, "{}", ids[idx]);
        }
        assert_eq!(file_name("user-42").unwrap(), "user-42.json");
        assert!(file_name("").is_err());
    }

    #[test]
    fn warnings_flag_unrecognized_cadence() {
        let state = BudgetState::new()
            .with_income(IncomeRecord::new(10.0, Cadence::Unrecognized("hourly".into())));
        let warnings = state_warnings(&state);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("hourly"));
    }

    #[test]
    fn warnings_cover_transactions() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let state = BudgetState::new()
            .with_transaction(
                Transaction::income(10.0, "tips", date)
                    .with_cadence(Cadence::Unrecognized("yearly".into())),
            )
            .with_transaction(Transaction::expense(-4.0, "food", date))
            .with_transaction(Transaction::expense(f64::NAN, "fun", date))
            .with_transaction(Transaction::expense(3.0, "fun", date));
        let warnings = state_warnings(&state);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("transaction") && warnings[0].contains("yearly"));
        assert!(warnings[1].contains("invalid amount -4"));
        assert!(warnings[2].contains("invalid amount NaN"));
    }
}
