use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cadence::Cadence;

/// A recurring expense definition filed under a free-text category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub amount: f64,
    pub cadence: Cadence,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl ExpenseRecord {
    pub fn new(amount: f64, cadence: Cadence, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            cadence,
            category: category.into(),
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

    /// Grouping key: trimmed and lowercased category label.
    pub fn category_key(&self) -> String {
        category_key(&self.category)
    }
}

pub fn category_key(label: &str) -> String {
    label.trim().to_lowercase()
}
