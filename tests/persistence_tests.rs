mod common;

use budget_engine::{
    config::{Config, ConfigManager},
    core::{services::ProjectionService, AggregationMode},
    ledger::{BudgetState, Cadence, ExpenseRecord, ViewPeriod},
    storage::{load_state_from_path, save_state_to_path, state_warnings, JsonStorage, StateStore},
};
use chrono::NaiveDate;
use common::{scenario_state, temp_base};

#[test]
fn state_round_trips_through_store() {
    let storage = JsonStorage::new(Some(temp_base())).expect("create storage");
    let state = scenario_state();
    storage.save("Alice Smith", &state).expect("save state");

    let loaded = storage.load("Alice Smith").expect("load state").expect("state exists");
    assert_eq!(loaded, state);
    assert_eq!(storage.users().unwrap(), vec!["Alice Smith".to_string()]);
}

#[test]
fn similar_user_ids_keep_separate_budgets() {
    let storage = JsonStorage::new(Some(temp_base())).expect("create storage");
    let ids = ["alice smith", "alice_smith", "Alice Smith", "default", "../"];
    for (idx, id) in ids.iter().enumerate() {
        let state = BudgetState::new().with_expense(ExpenseRecord::new(
            idx as f64,
            Cadence::Monthly,
            "marker",
        ));
        storage.save(id, &state).unwrap();
    }

    for (idx, id) in ids.iter().enumerate() {
        let loaded = storage.load(id).unwrap().expect("state exists");
        assert_eq!(loaded.expenses[0].amount, idx as f64, "{id}");
    }
    let mut expected: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    expected.sort();
    assert_eq!(storage.users().unwrap(), expected);
    assert!(storage.save("", &BudgetState::new()).is_err());
}

#[test]
fn unknown_user_loads_nothing() {
    let storage = JsonStorage::new(Some(temp_base())).expect("create storage");
    assert!(storage.load("nobody").unwrap().is_none());
    assert!(storage.load_projections("nobody").unwrap().is_empty());
}

#[test]
fn projections_are_stored_per_user() {
    let storage = JsonStorage::new(Some(temp_base())).expect("create storage");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = ProjectionService::records(&scenario_state(), "bob", 6, start);
    storage.save_projections("bob", &records).unwrap();

    let loaded = storage.load_projections("bob").unwrap();
    assert_eq!(loaded, records);
    assert!(storage.projections_path("bob").unwrap().exists());
}

#[test]
fn unrecognized_cadence_survives_storage() {
    let base = temp_base();
    let path = base.join("budget.json");
    let state = BudgetState::new().with_expense(ExpenseRecord::new(
        30.0,
        Cadence::Unrecognized("biweekly".into()),
        "gym",
    ));
    save_state_to_path(&state, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"biweekly\""));

    let loaded = load_state_from_path(&path).unwrap();
    assert_eq!(loaded.expenses[0].cadence, Cadence::Unrecognized("biweekly".into()));
    assert_eq!(loaded.expenses[0].monthly_amount(), 30.0);
    assert_eq!(state_warnings(&loaded).len(), 1);
}

#[test]
fn malformed_file_is_a_storage_error() {
    let base = temp_base();
    let path = base.join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_state_from_path(&path).unwrap_err();
    assert!(err.to_string().starts_with("Persistence error"));
}

#[test]
fn config_manager_persists_preferences() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let mut config = Config::default();
    config.set("mode", "transactions").unwrap();
    config.set("view", "week").unwrap();
    config.last_user = Some("alice".into());
    manager.save(&config).unwrap();

    let reloaded = ConfigManager::with_base_dir(base).unwrap().load().unwrap();
    assert_eq!(reloaded.aggregation_mode, AggregationMode::DatedTransactions);
    assert_eq!(reloaded.default_view, ViewPeriod::Weekly);
    assert_eq!(reloaded.last_user.as_deref(), Some("alice"));
}
