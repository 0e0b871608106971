//! DataTable Engine
//!
//! Search, per-column filters, single-key sort and pagination over an
//! externally owned row collection, plus column visibility, ordering,
//! resizing, totals and row selection.

pub mod aggregate;
pub mod cache;
pub mod columns;
pub mod data_provider;
pub mod data_table;
pub mod filter;
pub mod pagination;
pub mod resize;
pub mod selection;
pub mod sort;

pub use aggregate::{Aggregates, aggregates};
pub use cache::CacheStats;
pub use data_provider::{DataProvider, VecDataProvider};
pub use data_table::{DataTable, ExportTable, LoadState, PageRow, TableView};
pub use filter::{ColumnFilters, FilterCriteria, filter};
pub use pagination::{PageWindow, PaginationDescriptor, PaginationMode, page_window, paginate, total_pages};
pub use resize::ResizeSession;
pub use selection::{RowId, Selection};
pub use sort::{SortDirection, SortSpec, sort_rows};
