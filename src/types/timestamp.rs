use crate::types::errors::TimestampError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const OFFSET_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// An ISO-8601 timestamp that remembers the exact text it was parsed from.
///
/// `wall_clock` is the local time in whatever offset the text carried. No
/// timezone conversion is ever applied, so `date()` is a plain truncation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Timestamp {
    raw: String,
    wall_clock: NaiveDateTime,
}

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.wall_clock.date()
    }
}

fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    let value = expand_shorthand(value);

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&value, format) {
            return Some(parsed.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Rewrites the ISO shorthands chrono has no directive for: a trailing `Z`
/// becomes `+00:00` and an hour-only time (`THH`) gains `:00` minutes.
fn expand_shorthand(value: &str) -> String {
    let mut expanded = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string()
    };

    let bytes = expanded.as_bytes();
    let hour_only = bytes.len() >= 13
        && matches!(bytes[10], b'T' | b't' | b' ')
        && bytes[11..13].iter().all(u8::is_ascii_digit)
        && bytes.get(13).is_none_or(|&next| matches!(next, b'+' | b'-'));

    if hour_only {
        expanded.insert_str(13, ":00");
    }

    expanded
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wall_clock = parse_wall_clock(value)
            .ok_or_else(|| TimestampError::InvalidFormat(value.to_string()))?;

        Ok(Timestamp {
            raw: value.to_string(),
            wall_clock,
        })
    }
}

impl Display for Timestamp {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
