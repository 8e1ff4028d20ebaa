//! # Calendar Dates
//!
//! Defines `ContentDate`, the calendar date stored for image capture nights
//! and acquisition sessions. The canonical text form is `YYYY-MM-DD`.
//!
//! Documents may carry either that literal text or a native date/time
//! value (a YAML timestamp such as `2025-12-26T21:30:00Z`). The schema layer
//! reduces date/time values to their calendar date with
//! [`ContentDate::parse_lenient`] *before* pattern validation, so both
//! spellings of the same night produce the same stored value.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date/time layouts accepted by [`ContentDate::parse_lenient`] besides
/// RFC 3339. These are the YAML 1.1 timestamp spellings without an offset.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A calendar date, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentDate(NaiveDate);

impl ContentDate {
    /// Parse the canonical `YYYY-MM-DD` form.
    ///
    /// The input must be exactly ten characters of `dddd-dd-dd` and name a
    /// real calendar day; `2025-02-30` is rejected.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !is_iso_date_shape(s) {
            return Err(CoreError::InvalidDate {
                value: s.to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            });
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|e| CoreError::InvalidDate {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// Parse a date or a date/time value, keeping only the calendar date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 date/times (converted to UTC before
    /// the date is taken) and offset-less `YYYY-MM-DDTHH:MM:SS` /
    /// `YYYY-MM-DD HH:MM:SS` with optional fractional seconds.
    pub fn parse_lenient(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim();
        if is_iso_date_shape(trimmed) {
            return Self::parse(trimmed);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc).date_naive()));
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(dt.date()));
            }
        }
        Err(CoreError::InvalidDate {
            value: s.to_string(),
            reason: "not a date or date/time".to_string(),
        })
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso_date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

/// Whether `s` has the literal `dddd-dd-dd` shape.
pub fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for ContentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_date())
    }
}

impl Serialize for ContentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_date())
    }
}

impl<'de> Deserialize<'de> for ContentDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
