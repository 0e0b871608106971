//! Grid Constants
//!
//! Centralized defaults for pagination, column sizing and memoization.

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Number of page buttons shown around the current page
pub const PAGE_WINDOW: usize = 5;

/// Column width constraints
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;
pub const DEFAULT_MIN_COLUMN_WIDTH: f32 = 40.0;

/// Memoized results kept per pipeline stage
pub const DEFAULT_CACHE_CAPACITY: usize = 8;
