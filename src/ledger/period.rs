use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reporting period used by the transaction dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPeriod {
    Weekly,
    #[default]
    Monthly,
}

impl ViewPeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Some(ViewPeriod::Weekly),
            "monthly" | "month" => Some(ViewPeriod::Monthly),
            _ => None,
        }
    }

    /// Look-back window ending on `reference`: the last seven days for the
    /// weekly view, the last calendar month for the monthly view.
    pub fn window_ending(&self, reference: NaiveDate) -> DateWindow {
        let start = match self {
            ViewPeriod::Weekly => reference - Duration::days(7),
            ViewPeriod::Monthly => shift_month(reference, -1),
        };
        DateWindow {
            start,
            end: reference,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewPeriod::Weekly => "weekly",
            ViewPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ViewPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("window start {start} is after end {end}")]
pub struct DateWindowError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if start > end {
            return Err(DateWindowError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// First day of the month `offset` months after the month containing `date`.
pub fn add_months(date: NaiveDate, offset: u32) -> Option<NaiveDate> {
    month_start(date).checked_add_months(Months::new(offset))
}

/// `YYYY-MM` key used for projection records.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses a `YYYY-MM` key into the first day of that month.
pub fn parse_month_key(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d").ok()
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_rolls_across_years() {
        assert_eq!(add_months(date(2024, 11, 17), 0), Some(date(2024, 11, 1)));
        assert_eq!(add_months(date(2024, 11, 17), 2), Some(date(2025, 1, 1)));
        assert_eq!(add_months(date(2024, 12, 31), 13), Some(date(2026, 1, 1)));
    }

    #[test]
    fn monthly_window_clamps_to_shorter_month() {
        let window = ViewPeriod::Monthly.window_ending(date(2024, 3, 31));
        assert_eq!(window.start, date(2024, 2, 29));
        assert_eq!(window.end, date(2024, 3, 31));
        assert!(window.contains(date(2024, 3, 1)));
        assert!(!window.contains(date(2024, 2, 28)));
    }

    #[test]
    fn weekly_window_covers_seven_days_back() {
        let window = ViewPeriod::Weekly.window_ending(date(2024, 1, 3));
        assert_eq!(window.start, date(2023, 12, 27));
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        let err = DateWindow::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn month_keys_and_labels() {
        assert_eq!(month_key(date(2024, 6, 15)), "2024-06");
        assert_eq!(parse_month_key("2024-06"), Some(date(2024, 6, 1)));
        assert_eq!(parse_month_key("June"), None);
        assert_eq!(month_label(date(2024, 12, 1)), "Dec");
    }
}
