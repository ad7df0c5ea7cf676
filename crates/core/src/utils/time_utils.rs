use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{Result, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted date-time layouts, tried in order after the bare date form.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)?)
}

/// Parses a transaction timestamp.
///
/// Accepts either a bare date (`YYYY-MM-DD`, interpreted as midnight) or a
/// date-time (`YYYY-MM-DDTHH:MM:SS`, with a space instead of `T` and optional
/// fractional seconds also accepted).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    Err(ValidationError::InvalidInput(format!(
        "Invalid timestamp '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
        value
    ))
    .into())
}
