//! Enterprise Grid Library
//!
//! A data-grid engine: it takes a column schema and a row collection and
//! produces the filtered, sorted, paginated slice a rendering layer paints,
//! together with column totals, selection state and host notifications.

pub mod constants;
pub mod data_table;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod i18n;
pub mod state;
pub mod utils;

pub use data_table::{DataProvider, DataTable, TableView, VecDataProvider};
pub use domain::{CellValue, ColumnSchema, ColumnSpec, ColumnType, GridConfig, Row};
pub use error::{Error, Result};
