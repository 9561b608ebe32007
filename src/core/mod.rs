//! The budgeting engine: normalization, aggregation, projection, and the
//! chart shapes derived from them.

pub mod aggregate;
pub mod charts;
pub mod normalize;
pub mod projection;
pub mod services;
pub mod utils;

pub use aggregate::{aggregate, AggregationMode, BudgetSummary, CategoryBreakdown, CategoryTotal};
pub use normalize::{convert_for_view, normalize_to_monthly};
pub use projection::{project_savings, ProjectionPoint, SavingsProjectionRecord};
