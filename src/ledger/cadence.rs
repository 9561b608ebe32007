use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often an income or expense amount recurs.
///
/// Tags are parsed case-insensitively and parsing never fails: a tag that is
/// not one of `daily`, `weekly` or `monthly` is kept verbatim as
/// [`Cadence::Unrecognized`] and is normalized as if it were monthly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cadence {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Unrecognized(String),
}

impl Cadence {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Cadence::Daily,
            "weekly" => Cadence::Weekly,
            "monthly" => Cadence::Monthly,
            _ => {
                tracing::warn!(cadence = raw, "unrecognized cadence, treating as monthly");
                Cadence::Unrecognized(raw.to_string())
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Cadence::Unrecognized(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
            Cadence::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Cadence::Daily => "Daily".into(),
            Cadence::Weekly => "Weekly".into(),
            Cadence::Monthly => "Monthly".into(),
            Cadence::Unrecognized(raw) => format!("{raw} (as monthly)"),
        }
    }
}

impl FromStr for Cadence {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Cadence::parse(s))
    }
}

impl From<String> for Cadence {
    fn from(raw: String) -> Self {
        Cadence::parse(&raw)
    }
}

impl From<Cadence> for String {
    fn from(cadence: Cadence) -> Self {
        cadence.as_str().to_string()
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
