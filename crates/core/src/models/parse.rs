//! Wire value parsing utilities
//!
//! Provides lenient decoding of API values: the server may omit fields or send
//! `null` where the client expects a plain value.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Deserialize a value, mapping `null` to `T::default()`.
///
/// Pair with `#[serde(default)]` so that a missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a date sent by the API.
///
/// Accepts RFC3339 timestamps (`1990-01-05T00:00:00.000Z`) and plain
/// `YYYY-MM-DD` dates.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Format a date as `January 5, 1990`.
///
/// Empty or unparseable input yields an empty string.
pub fn format_long_date(s: &str) -> String {
    parse_date(s)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date_from_timestamp() {
        assert_eq!(format_long_date("1990-01-05T00:00:00.000Z"), "January 5, 1990");
    }

    #[test]
    fn test_long_date_from_plain_date() {
        assert_eq!(format_long_date("2001-12-31"), "December 31, 2001");
    }

    #[test]
    fn test_long_date_empty_or_garbage() {
        assert_eq!(format_long_date(""), "");
        assert_eq!(format_long_date("not a date"), "");
    }
}
