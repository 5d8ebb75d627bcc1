//! Calendar date parsing for request bodies.
//!
//! Forms send plain `YYYY-MM-DD` dates, but some clients echo back full
//! RFC 3339 timestamps they previously received. Both are accepted; the
//! timestamp form is reduced to its UTC calendar date.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CoreError;

/// Parse a required date field, naming `field` in the error message.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' is required")));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid '{field}' value '{raw}'. Expected YYYY-MM-DD"
            ))
        })
}

/// Parse an optional date field; `None` stays `None`.
pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    raw.map(|r| parse_date(field, r)).transpose()
}
