//! Row - One record of tabular data
//!
//! An open mapping from column key to scalar. The column schema describes which
//! keys are expected; rows are free to omit some or carry extra ones.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::value::CellValue;

static NULL: CellValue = CellValue::Null;

/// A single table row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: AHashMap<String, CellValue>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    /// Get a field; a missing key reads as null
    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&NULL)
    }

    /// Check whether the row carries a field
    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// All field values (unordered)
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.values()
    }

    /// Field names and values (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.cells.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
