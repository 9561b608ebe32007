//! Forward savings projection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::period::{add_months, month_key, month_label};

/// Number of months projected when no horizon is configured.
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// First day of the projected month.
    pub month: NaiveDate,
    pub cumulative_amount: f64,
}

impl ProjectionPoint {
    pub fn month_key(&self) -> String {
        month_key(self.month)
    }

    pub fn month_label(&self) -> &'static str {
        month_label(self.month)
    }
}

/// Row shape handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjectionRecord {
    pub user_id: String,
    pub month: String,
    pub projected_amount: f64,
}

/// Cumulative savings for each of the `horizon_months` months starting with
/// the month containing `start`.
///
/// Income and expenses are assumed constant, so point `i` holds
/// `(monthly_income - monthly_expenses) * (i + 1)`.
pub fn project_savings(
    monthly_income: f64,
    monthly_expenses: f64,
    horizon_months: u32,
    start: NaiveDate,
) -> Vec<ProjectionPoint> {
    let monthly_savings = monthly_income - monthly_expenses;
    (0..horizon_months)
        .map_while(|offset| {
            add_months(start, offset).map(|month| ProjectionPoint {
                month,
                cumulative_amount: monthly_savings * f64::from(offset + 1),
            })
        })
        .collect()
}

pub fn to_records(user_id: &str, points: &[ProjectionPoint]) -> Vec<SavingsProjectionRecord> {
    points
        .iter()
        .map(|point| SavingsProjectionRecord {
            user_id: user_id.to_string(),
            month: point.month_key(),
            projected_amount: point.cumulative_amount,
        })
        .collect()
}
