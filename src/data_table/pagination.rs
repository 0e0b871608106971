//! Pagination stage
//!
//! Slices the processed rows into pages and computes the page-button window.
//! The requested page is never clamped: out-of-range pages are simply empty.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::PAGE_WINDOW;

/// Where page slicing happens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaginationMode {
    /// Rows are sliced locally
    #[default]
    Client,
    /// The host supplies only the current page and reports the full count
    Server { total: usize },
    /// Every processed row is shown
    Disabled,
}

/// Pagination descriptor supplied by a host doing server-driven paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDescriptor {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// One page of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_pages: usize,
}

/// `ceil(total / page_size)`, at least 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Index range of a 1-based page, clipped to `len`
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    if page == 0 || page_size == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= len {
        return len..len;
    }
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Pagination stage entry point
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Page<T> {
    Page {
        rows: rows[page_range(rows.len(), page, page_size)].to_vec(),
        total_pages: total_pages(rows.len(), page_size),
    }
}

/// Page buttons around the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Up to five page numbers starting two before `page`, restricted to
/// `1..=total_pages`.
pub fn page_window(page: usize, total_pages: usize) -> PageWindow {
    let len = PAGE_WINDOW.min(total_pages);
    let first = page as i64 - 2;
    let pages = (0..len as i64)
        .map(|i| first + i)
        .filter(|p| *p >= 1 && *p <= total_pages as i64)
        .map(|p| p as usize)
        .collect();

    PageWindow {
        pages,
        can_prev: page > 1,
        can_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_three_rows() {
        let rows: Vec<u32> = (1..=23).collect();
        let page = paginate(&rows, 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows, vec![21, 22, 23]);
    }

    #[test]
    fn test_empty_has_one_page() {
        let rows: Vec<u32> = Vec::new();
        let page = paginate(&rows, 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let rows: Vec<u32> = (1..=5).collect();
        assert!(paginate(&rows, 4, 2).rows.is_empty());
        assert!(paginate(&rows, 0, 2).rows.is_empty());
        assert!(paginate(&rows, usize::MAX, 2).rows.is_empty());
    }

    #[test]
    fn test_pages_cover_every_row_once() {
        let rows: Vec<u32> = (0..47).collect();
        let size = 6;
        let pages = total_pages(rows.len(), size);
        let joined: Vec<u32> = (1..=pages)
            .flat_map(|p| paginate(&rows, p, size).rows)
            .collect();
        assert_eq!(joined, rows);
    }

    #[test]
    fn test_page_window_in_the_middle() {
        let window = page_window(5, 10);
        assert_eq!(window.pages, vec![3, 4, 5, 6, 7]);
        assert!(window.can_prev);
        assert!(window.can_next);
    }

    #[test]
    fn test_page_window_at_edges() {
        let first = page_window(1, 10);
        assert_eq!(first.pages, vec![1, 2, 3]);
        assert!(!first.can_prev);

        let last = page_window(10, 10);
        assert_eq!(last.pages, vec![8, 9, 10]);
        assert!(!last.can_next);

        let single = page_window(1, 1);
        assert_eq!(single.pages, vec![1]);
    }

    #[test]
    fn test_descriptor_uses_camel_case() {
        let desc: PaginationDescriptor =
            serde_json::from_str(r#"{"page": 2, "pageSize": 25, "total": 80}"#).expect("json");
        assert_eq!(total_pages(desc.total, desc.page_size), 4);
    }
}
