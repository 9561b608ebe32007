//! Chart-ready shapes for the savings bar chart and the category pie chart.

use serde::Serialize;

use super::aggregate::CategoryBreakdown;
use super::projection::ProjectionPoint;

pub const PALETTE: [&str; 4] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsBar {
    pub month: &'static str,
    pub amount: f64,
}

/// Colours cycle through [`PALETTE`] in first-seen category order.
pub fn category_slices(breakdown: &CategoryBreakdown) -> Vec<CategorySlice> {
    breakdown
        .iter()
        .enumerate()
        .map(|(index, entry)| CategorySlice {
            name: entry.label.clone(),
            value: entry.amount,
            fill: PALETTE[index % PALETTE.len()],
        })
        .collect()
}

pub fn savings_bars(points: &[ProjectionPoint]) -> Vec<SavingsBar> {
    points
        .iter()
        .map(|point| SavingsBar {
            month: point.month_label(),
            amount: point.cumulative_amount,
        })
        .collect()
}
