use chrono::{Local, NaiveDate};

const TODAY_ENV: &str = "BUDGET_ENGINE_TODAY";

/// Source of "today" for projections and dashboard windows.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `BUDGET_ENGINE_TODAY=YYYY-MM-DD` pins the date, otherwise the system clock.
pub fn from_env() -> Box<dyn Clock> {
    let pinned = std::env::var(TODAY_ENV)
        .ok()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
    match pinned {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}
