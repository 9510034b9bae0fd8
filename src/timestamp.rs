//! Creation timestamp decoding
//!
//! `created_at` columns are filled by SQLite's `CURRENT_TIMESTAMP`, which
//! stores UTC text as `YYYY-MM-DD HH:MM:SS`. Rows copied in from elsewhere
//! may carry ISO-8601 text instead, or an integer epoch. Everything is
//! decoded here and handed out as a UTC `NaiveDateTime`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::ValueRef;

use crate::{Error, Result};

/// Canonical storage format (no fractional seconds, no zone)
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when showing a timestamp in a table row
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Offset-carrying ISO-8601 layouts tried after `Z` has been rewritten to `+00:00`
const ISO_OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Naive ISO-8601 layouts (zone-less values are taken as UTC)
const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored creation timestamp.
///
/// The exact storage format is tried first. Anything else goes through the
/// ISO-8601 fallback, where a trailing `Z` is replaced by `+00:00` before
/// parsing. Offsets are folded into UTC.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, STORAGE_FORMAT) {
        return Ok(ts);
    }
    parse_iso8601(raw)
}

fn parse_iso8601(raw: &str) -> Result<NaiveDateTime> {
    let normalized = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };

    for fmt in ISO_OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&normalized, fmt) {
            return Ok(ts.naive_utc());
        }
    }

    for fmt in ISO_NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(Error::InvalidTimestamp(raw.to_string()))
}

/// Decode a `created_at` column value.
///
/// Text goes through [`parse_timestamp`]; integers are Unix epoch seconds.
pub fn from_sql(value: ValueRef<'_>) -> Result<NaiveDateTime> {
    match value {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| Error::InvalidTimestamp(e.to_string()))?;
            parse_timestamp(text)
        }
        ValueRef::Integer(secs) => DateTime::from_timestamp(secs, 0)
            .map(|ts| ts.naive_utc())
            .ok_or_else(|| Error::InvalidTimestamp(format!("epoch seconds out of range: {secs}"))),
        other => Err(Error::InvalidTimestamp(format!(
            "unsupported column type {}",
            other.data_type()
        ))),
    }
}

/// Row-level adapter so decoding failures surface as `rusqlite` conversion errors
pub(crate) fn column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let value = row.get_ref(idx)?;
    from_sql(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(e))
    })
}

/// Render a timestamp in the canonical storage format
pub fn to_storage_string(ts: &NaiveDateTime) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}
