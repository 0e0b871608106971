//! Domain - Pure Data Structures
//!
//! Rows, cell values, the column schema and the grid configuration.

pub mod column;
pub mod config;
pub mod row;
pub mod value;

pub use column::{ColumnSchema, ColumnSpec, ColumnType, SortKey};
pub use config::{GridConfig, GridFeatures};
pub use row::Row;
pub use value::CellValue;
