//! Cell Value - Scalar stored in a row field
//!
//! Holds the coercion rules shared by the filter, sort and aggregate stages:
//! the lowercase string form, the numeric parse and the date parse.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Date-time layouts accepted for textual dates (after RFC 3339)
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts accepted for textual dates
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// A single scalar cell
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or null field
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Date-like instant (serialized as RFC 3339)
    Date(DateTime<Utc>),
}

impl CellValue {
    /// Check if the cell is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form used for searching, filtering and text ordering.
    ///
    /// Null renders as the empty string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            CellValue::Number(n) => Cow::Owned(number_text(*n)),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Date(dt) => Cow::Owned(dt.to_rfc3339()),
        }
    }

    /// Lowercase string form
    pub fn to_lower_text(&self) -> String {
        self.to_text().to_lowercase()
    }

    /// Numeric value. Textual values have thousands-separator commas stripped;
    /// anything unparseable is `0`.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Null => 0.0,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::Number(n) if n.is_nan() => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_number(s),
            CellValue::Date(dt) => dt.timestamp_millis() as f64,
        }
    }

    /// Date instant, or `None` when the value cannot be read as a date.
    /// Numbers are taken as milliseconds since the Unix epoch.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(dt) => Some(*dt),
            CellValue::Text(s) => parse_date(s),
            CellValue::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(*n as i64),
            _ => None,
        }
    }

    /// Truth value used by boolean columns
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "y" | "si" | "sí"
            ),
            CellValue::Date(_) => true,
        }
    }
}

/// Render a number the way a browser would: integral values without a fraction
fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse a textual number, stripping thousands-separator commas.
///
/// Unparseable input yields `0`.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
        .unwrap_or(0.0)
}

/// Parse a textual date into a UTC instant
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            Value::String(s) => CellValue::Text(s),
            // Nested structures are not scalars; keep their JSON text
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(CellValue::from)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}
