use crate::errors::{EngineError, Result};

/// Parses user-entered money, accepting an optional leading `$`.
///
/// Amounts must be finite and non-negative; the engine itself does not check.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let value: f64 = digits
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("`{raw}` is not a number")))?;
    if !value.is_finite() {
        return Err(EngineError::InvalidInput(format!("`{raw}` is not a finite amount")));
    }
    if value < 0.0 {
        return Err(EngineError::InvalidInput(format!("amount must not be negative, got {raw}")));
    }
    Ok(value)
}
