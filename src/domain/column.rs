//! Column Definition
//!
//! Schema entries for the grid. The column type is a closed set; each variant
//! carries its own sort-key extraction and cell formatter so callers resolve the
//! behavior once per column instead of branching per cell.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::value::CellValue;
use crate::error::{Error, Result};
use crate::i18n::Locale;
use crate::utils::format;

/// Declared data type of a column
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Currency,
    Boolean,
    Status,
}

/// Formats one cell for display
pub type CellFormatter = fn(&CellValue, Locale) -> String;

impl ColumnType {
    /// Whether the column holds summable numbers
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }

    /// Extract the ordering key for a cell of this type
    pub fn sort_key(self, value: &CellValue) -> SortKey {
        match self {
            ColumnType::Number | ColumnType::Currency => SortKey::Number(value.as_number()),
            ColumnType::Date => SortKey::Date(value.as_date()),
            ColumnType::Text | ColumnType::Boolean | ColumnType::Status => {
                SortKey::Text(value.to_lower_text())
            }
        }
    }

    /// Display formatter for this type
    pub fn formatter(self) -> CellFormatter {
        match self {
            ColumnType::Text | ColumnType::Status => format_text,
            ColumnType::Number => format_number_cell,
            ColumnType::Currency => format_currency_cell,
            ColumnType::Date => format_date_cell,
            ColumnType::Boolean => format_boolean_cell,
        }
    }
}

fn format_text(value: &CellValue, _locale: Locale) -> String {
    value.to_text().into_owned()
}

fn format_number_cell(value: &CellValue, locale: Locale) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Number(n) => format::format_decimal(*n, locale),
        // Non-numeric payloads are shown as they came in
        other => other.to_text().into_owned(),
    }
}

fn format_currency_cell(value: &CellValue, locale: Locale) -> String {
    match value {
        CellValue::Null => String::new(),
        other => format::format_currency(other.as_number(), locale),
    }
}

fn format_date_cell(value: &CellValue, locale: Locale) -> String {
    match value.as_date() {
        Some(dt) => format::format_date(&dt, locale),
        // Unparseable dates fall back to their raw text
        None => value.to_text().into_owned(),
    }
}

fn format_boolean_cell(value: &CellValue, locale: Locale) -> String {
    if value.is_null() {
        return String::new();
    }
    let key = if value.is_truthy() { "bool-yes" } else { "bool-no" };
    crate::i18n::t(locale, key).to_string()
}

/// Ordering key of a cell under its column's type
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    /// Unparseable dates order before every valid date
    Date(Option<DateTime<Utc>>),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// `-0.0` and `0.0` must tie
fn unsigned_zero(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else {
        n
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                unsigned_zero(*a).total_cmp(&unsigned_zero(*b))
            }
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Column definition for the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    /// Column identifier, unique within the schema
    pub key: String,
    /// Column header label
    pub label: String,
    /// Whether the column header toggles sorting
    #[serde(default)]
    pub sortable: bool,
    /// Whether the column accepts a per-column filter
    #[serde(default)]
    pub filterable: bool,
    /// Declared data type
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    /// Pinned column, exempt from hiding and reordering
    #[serde(default)]
    pub fixed: bool,
    /// Initial width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl ColumnSpec {
    /// Create a new text column
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: false,
            column_type: ColumnType::Text,
            fixed: false,
            width: None,
        }
    }

    /// Set the column type
    pub fn of_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Make the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Pin the column
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Set the initial width
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Format a cell of this column
    pub fn format(&self, value: &CellValue, locale: Locale) -> String {
        (self.column_type.formatter())(value, locale)
    }
}

/// Ordered column schema with unique keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<ColumnSpec>,
}

impl ColumnSchema {
    /// Build a schema, rejecting duplicate keys
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == col.key) {
                return Err(Error::DuplicateColumn {
                    key: col.key.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Look up a column by key
    pub fn get(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Look up a column, failing on unknown keys
    pub fn require(&self, key: &str) -> Result<&ColumnSpec> {
        self.get(key).ok_or_else(|| Error::UnknownColumn {
            key: key.to_string(),
        })
    }

    /// Check whether a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_rejects_duplicates() {
        let result = ColumnSchema::new(vec![
            ColumnSpec::new("a", "A"),
            ColumnSpec::new("a", "Again"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateColumn { key }) if key == "a"));
    }

    #[test]
    fn test_schema_lookup() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("id", "ID").fixed(),
            ColumnSpec::new("amt", "Amount").of_type(ColumnType::Currency),
        ])
        .expect("schema");
        assert!(schema.contains("amt"));
        assert!(schema.require("nope").is_err());
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["id", "amt"]);
    }

    #[test]
    fn test_numeric_sort_key_parses_text() {
        let a = ColumnType::Currency.sort_key(&CellValue::from("1,000"));
        let b = ColumnType::Currency.sort_key(&CellValue::from("250"));
        assert!(b < a);
    }

    #[test]
    fn test_text_sort_key_is_case_insensitive() {
        let a = ColumnType::Text.sort_key(&CellValue::from("apple"));
        let b = ColumnType::Text.sort_key(&CellValue::from("Banana"));
        assert!(a < b);
    }

    #[test]
    fn test_invalid_date_orders_first() {
        let bad = ColumnType::Date.sort_key(&CellValue::from("soon"));
        let good = ColumnType::Date.sort_key(&CellValue::from("2020-01-01"));
        assert!(bad < good);
    }

    #[test]
    fn test_date_format_falls_back_to_raw_text() {
        let col = ColumnSpec::new("d", "Date").of_type(ColumnType::Date);
        assert_eq!(col.format(&CellValue::from("tomorrow"), Locale::EnUS), "tomorrow");
        assert_eq!(col.format(&CellValue::from("2024-03-01"), Locale::EsES), "01/03/2024");
    }

    #[test]
    fn test_boolean_format_is_localized() {
        let col = ColumnSpec::new("ok", "OK").of_type(ColumnType::Boolean);
        assert_eq!(col.format(&CellValue::from(true), Locale::EsES), "Sí");
        assert_eq!(col.format(&CellValue::from(false), Locale::EnUS), "No");
    }

    #[test]
    fn test_column_spec_from_toml() {
        let col: ColumnSpec = toml::from_str(
            r#"
            key = "amt"
            label = "Amount"
            type = "currency"
            sortable = true
            "#,
        )
        .expect("toml");
        assert_eq!(col.column_type, ColumnType::Currency);
        assert!(col.sortable);
        assert!(!col.fixed);
    }
}
