//! Conversion of cadence-tagged amounts into comparable period figures.

use crate::ledger::{Cadence, ViewPeriod};

/// Average number of days in a month.
pub const DAYS_PER_MONTH: f64 = 30.44;
/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: f64 = 4.35;

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_WEEK: f64 = 7.0;

/// Monthly equivalent of `amount` recurring at `cadence`.
///
/// Unrecognized cadences are treated as monthly. NaN inputs propagate.
pub fn normalize_to_monthly(amount: f64, cadence: &Cadence) -> f64 {
    match cadence {
        Cadence::Daily => amount * DAYS_PER_MONTH,
        Cadence::Weekly => amount * WEEKS_PER_MONTH,
        Cadence::Monthly | Cadence::Unrecognized(_) => amount,
    }
}

/// Expresses `amount` in the dashboard's `view` period.
///
/// Weekly and monthly figures convert through the 52 weeks / 12 months year;
/// daily figures scale to a month with [`DAYS_PER_MONTH`] or to a week with
/// seven days. Untagged amounts and amounts already in the view's period are
/// returned unchanged.
pub fn convert_for_view(amount: f64, cadence: Option<&Cadence>, view: ViewPeriod) -> f64 {
    match (cadence, view) {
        (Some(Cadence::Weekly), ViewPeriod::Monthly) => amount * WEEKS_PER_YEAR / MONTHS_PER_YEAR,
        (Some(Cadence::Monthly), ViewPeriod::Weekly) => amount * MONTHS_PER_YEAR / WEEKS_PER_YEAR,
        (Some(Cadence::Daily), ViewPeriod::Monthly) => amount * DAYS_PER_MONTH,
        (Some(Cadence::Daily), ViewPeriod::Weekly) => amount * DAYS_PER_WEEK,
        _ => amount,
    }
}
