//! DataProvider Trait
//!
//! The grid never owns its rows; a provider lends them to the pipeline.

use std::sync::Arc;

use crate::domain::Row;

/// Trait for providing rows to the DataTable
pub trait DataProvider {
    /// All rows in source order
    fn rows(&self) -> &[Row];

    /// Get the total number of rows
    fn len(&self) -> usize {
        self.rows().len()
    }

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index
    fn row(&self, index: usize) -> Option<&Row> {
        self.rows().get(index)
    }
}

/// Simple in-memory data provider over a shared row collection
#[derive(Debug, Clone, Default)]
pub struct VecDataProvider {
    rows: Arc<Vec<Row>>,
}

impl VecDataProvider {
    /// Create a new VecDataProvider
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Create from a shared reference
    pub fn from_arc(rows: Arc<Vec<Row>>) -> Self {
        Self { rows }
    }

    /// Shared handle to the rows
    pub fn shared(&self) -> Arc<Vec<Row>> {
        self.rows.clone()
    }
}

impl DataProvider for VecDataProvider {
    fn rows(&self) -> &[Row] {
        &self.rows
    }
}
