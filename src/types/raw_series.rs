//! Raw, irregular gridpoint values as reported upstream: each value is valid over an
//! explicit span (`<ISO instant>/<ISO duration>`) rather than at a fixed hour.

use crate::types::forecast_field::ForecastField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single value and the span it is valid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFieldValue {
    /// Start of the validity span.
    pub valid_start: DateTime<Utc>,
    /// ISO-8601 duration of the span, kept verbatim (e.g. `"PT3H"`, `"P1DT6H"`).
    /// Parsed lazily so a malformed duration only affects its own entry.
    pub valid_duration: String,
    /// The raw value in upstream units, `None` when upstream reported null.
    pub value: Option<f64>,
}

impl RawFieldValue {
    /// Parses an NWS `validTime` string (`"2026-02-08T10:00:00+00:00/PT3H"`).
    ///
    /// Returns `None` if the start instant cannot be parsed. A missing or
    /// unparseable duration is kept as-is and later treated as one hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use event_weather::RawFieldValue;
    ///
    /// let v = RawFieldValue::from_valid_time("2026-02-08T10:00:00+00:00/PT3H", Some(12.5)).unwrap();
    /// assert_eq!(v.valid_duration, "PT3H");
    /// assert!(RawFieldValue::from_valid_time("yesterday/PT1H", None).is_none());
    /// ```
    pub fn from_valid_time(valid_time: &str, value: Option<f64>) -> Option<Self> {
        let (start, duration) = match valid_time.split_once('/') {
            Some((start, duration)) => (start, duration),
            None => (valid_time, ""),
        };
        let valid_start = DateTime::parse_from_rfc3339(start.trim())
            .ok()?
            .with_timezone(&Utc);
        Some(Self {
            valid_start,
            valid_duration: duration.trim().to_string(),
            value,
        })
    }
}

/// All raw spans for one tracked field, in upstream (declaration) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFieldSeries {
    pub field: ForecastField,
    pub values: Vec<RawFieldValue>,
}

impl RawFieldSeries {
    pub fn new(field: ForecastField, values: Vec<RawFieldValue>) -> Self {
        Self { field, values }
    }

    pub fn empty(field: ForecastField) -> Self {
        Self::new(field, Vec::new())
    }
}
