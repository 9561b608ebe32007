use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cadence::Cadence;

/// A recurring or one-off income source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub amount: f64,
    pub cadence: Cadence,
    #[serde(default)]
    pub description: String,
}

impl IncomeRecord {
    pub fn new(amount: f64, cadence: Cadence) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            cadence,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn monthly_amount(&self) -> f64 {
        crate::core::normalize::normalize_to_monthly(self.amount, &self.cadence)
    }
}
