//! View State
//!
//! User-controlled display parameters of one grid: search, filters, sort,
//! visible and ordered columns, widths and page position. Every mutation that
//! names a column is validated against the schema.

use ahash::{AHashMap, AHashSet};
use tracing::warn;

use crate::constants::DEFAULT_COLUMN_WIDTH;
use crate::data_table::columns;
use crate::data_table::filter::ColumnFilters;
use crate::data_table::resize::ResizeSession;
use crate::data_table::sort::SortSpec;
use crate::domain::{ColumnSchema, ColumnSpec};
use crate::error::{Error, Result};

/// Mutable display state owned by the hosting view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    search_term: String,
    column_filters: ColumnFilters,
    sort: Option<SortSpec>,
    visible_columns: AHashSet<String>,
    column_order: Vec<String>,
    column_widths: AHashMap<String, f32>,
    page: usize,
    page_size: usize,
}

impl ViewState {
    /// Defaults: first page, no filters, no sort, every column visible
    pub fn new(schema: &ColumnSchema, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        Ok(Self {
            search_term: String::new(),
            column_filters: ColumnFilters::new(),
            sort: None,
            visible_columns: schema.keys().map(str::to_string).collect(),
            column_order: schema.keys().map(str::to_string).collect(),
            column_widths: schema
                .columns()
                .iter()
                .map(|c| (c.key.clone(), c.width.unwrap_or(DEFAULT_COLUMN_WIDTH)))
                .collect(),
            page: 1,
            page_size,
        })
    }

    // ==================== Getters ====================

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn visible_set(&self) -> &AHashSet<String> {
        &self.visible_columns
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_columns.contains(key)
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn column_width(&self, key: &str) -> f32 {
        self.column_widths
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Visible columns in display order
    pub fn visible_columns<'a>(&self, schema: &'a ColumnSchema) -> Vec<&'a ColumnSpec> {
        columns::visible_columns(schema, &self.column_order, &self.visible_columns)
    }

    // ==================== Search & Filters ====================

    /// Set the global search term. Returns whether it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Set one column filter; an empty value removes it.
    /// Returns whether the filter set changed.
    pub fn set_column_filter(
        &mut self,
        schema: &ColumnSchema,
        key: &str,
        value: impl Into<String>,
    ) -> Result<bool> {
        let column = require(schema, key)?;
        if !column.filterable {
            warn!(column = key, "Rejected filter on non-filterable column");
            return Err(Error::Invalid {
                message: format!("Column is not filterable: {key}"),
            });
        }

        let value = value.into();
        let changed = if value.is_empty() {
            self.column_filters.remove(key).is_some()
        } else {
            self.column_filters.insert(key.to_string(), value.clone()) != Some(value)
        };
        Ok(changed)
    }

    /// Remove every column filter
    pub fn clear_filters(&mut self) -> bool {
        let changed = !self.column_filters.is_empty();
        self.column_filters.clear();
        changed
    }

    // ==================== Sort ====================

    /// Header click on `key`. Non-sortable columns are ignored.
    /// Returns the new sort when it changed.
    pub fn toggle_sort(&mut self, schema: &ColumnSchema, key: &str) -> Result<Option<&SortSpec>> {
        let column = require(schema, key)?;
        if !column.sortable {
            return Ok(None);
        }
        self.sort = Some(SortSpec::after_click(self.sort.as_ref(), key));
        Ok(self.sort.as_ref())
    }

    /// Replace the sort outright. Only sortable columns are accepted.
    /// Returns whether the sort changed.
    pub fn set_sort(&mut self, schema: &ColumnSchema, sort: Option<SortSpec>) -> Result<bool> {
        if let Some(spec) = &sort {
            let column = require(schema, &spec.key)?;
            if !column.sortable {
                warn!(column = %spec.key, "Rejected sort on non-sortable column");
                return Err(Error::Invalid {
                    message: format!("Column is not sortable: {}", spec.key),
                });
            }
        }
        if sort == self.sort {
            return Ok(false);
        }
        self.sort = sort;
        Ok(true)
    }

    // ==================== Columns ====================

    /// Flip visibility of a non-fixed column.
    /// Returns whether the visible set changed.
    pub fn toggle_column_visibility(&mut self, schema: &ColumnSchema, key: &str) -> Result<bool> {
        let column = require(schema, key)?;
        if column.fixed {
            return Ok(false);
        }
        columns::toggle_visibility(&mut self.visible_columns, key);
        Ok(true)
    }

    /// Hide every hideable column when all are visible, otherwise show all
    pub fn toggle_all_columns(&mut self, schema: &ColumnSchema) {
        let hideable: Vec<&str> = schema
            .columns()
            .iter()
            .filter(|c| !c.fixed)
            .map(|c| c.key.as_str())
            .collect();
        let all_visible = hideable.iter().all(|k| self.visible_columns.contains(*k));

        for key in hideable {
            if all_visible {
                self.visible_columns.remove(key);
            } else {
                self.visible_columns.insert(key.to_string());
            }
        }
    }

    /// Drag `source` onto `target`. Fixed columns keep their position.
    /// Returns whether the order changed.
    pub fn move_column(&mut self, schema: &ColumnSchema, source: &str, target: &str) -> Result<bool> {
        let source_col = require(schema, source)?;
        let target_col = require(schema, target)?;
        if source_col.fixed || target_col.fixed {
            return Ok(false);
        }
        Ok(columns::reorder(&mut self.column_order, source, target))
    }

    /// Set a column width (presentational only)
    pub fn set_column_width(&mut self, schema: &ColumnSchema, key: &str, width: f32) -> Result<()> {
        require(schema, key)?;
        self.column_widths.insert(key.to_string(), width);
        Ok(())
    }

    /// Start dragging the right edge of `key` at pointer position `start_x`
    pub fn begin_resize(
        &mut self,
        schema: &ColumnSchema,
        key: &str,
        start_x: f32,
        min_width: f32,
    ) -> Result<ResizeSession<'_>> {
        require(schema, key)?;
        let start_width = self.column_width(key);
        Ok(ResizeSession::begin(
            &mut self.column_widths,
            key.to_string(),
            start_x,
            start_width,
            min_width,
        ))
    }

    // ==================== Pagination ====================

    /// Go to a 1-based page. The page is not clamped to the page count.
    pub fn set_page(&mut self, page: usize) -> Result<bool> {
        if page == 0 {
            return Err(Error::InvalidPage { page });
        }
        let changed = page != self.page;
        self.page = page;
        Ok(changed)
    }

    /// Change the page size and return to the first page
    pub fn set_page_size(&mut self, size: usize) -> Result<bool> {
        if size == 0 {
            return Err(Error::InvalidPageSize { size });
        }
        let changed = size != self.page_size;
        self.page_size = size;
        self.page = 1;
        Ok(changed)
    }

    /// Drop state that refers to columns no longer in `schema`
    pub fn reconcile(&mut self, schema: &ColumnSchema) {
        self.column_filters.retain(|k, _| schema.contains(k));
        if self.sort.as_ref().is_some_and(|s| !schema.contains(&s.key)) {
            self.sort = None;
        }
        self.visible_columns.retain(|k| schema.contains(k));
        self.column_order.retain(|k| schema.contains(k));
        self.column_widths.retain(|k, _| schema.contains(k));

        for column in schema.columns() {
            if !self.column_order.contains(&column.key) {
                self.column_order.push(column.key.clone());
                self.visible_columns.insert(column.key.clone());
            }
            self.column_widths
                .entry(column.key.clone())
                .or_insert(column.width.unwrap_or(DEFAULT_COLUMN_WIDTH));
        }
    }
}

fn require<'a>(schema: &'a ColumnSchema, key: &str) -> Result<&'a ColumnSpec> {
    schema.require(key).inspect_err(|_| {
        warn!(column = key, "Rejected view change for unknown column");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::sort::SortDirection;
    use crate::domain::ColumnType;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnSpec::new("id", "ID").fixed(),
            ColumnSpec::new("name", "Name").sortable().filterable(),
            ColumnSpec::new("amt", "Amount")
                .of_type(ColumnType::Currency)
                .sortable()
                .width(90.0),
            ColumnSpec::new("note", "Note"),
        ])
        .expect("schema")
    }

    fn state() -> ViewState {
        ViewState::new(&schema(), 10).expect("state")
    }

    #[test]
    fn test_defaults() {
        let state = state();
        assert_eq!(state.page(), 1);
        assert!(state.column_filters().is_empty());
        assert!(state.sort().is_none());
        assert_eq!(state.visible_set().len(), 4);
        assert_eq!(state.column_width("amt"), 90.0);
        assert_eq!(state.column_width("name"), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(ViewState::new(&schema(), 0).is_err());
    }

    #[test]
    fn test_filter_validation() {
        let schema = schema();
        let mut state = state();
        assert!(matches!(
            state.set_column_filter(&schema, "ghost", "x"),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(state.set_column_filter(&schema, "note", "x").is_err());
        assert!(state.set_column_filter(&schema, "name", "jo").expect("filter"));
        assert!(!state.set_column_filter(&schema, "name", "jo").expect("filter"));
        assert!(state.set_column_filter(&schema, "name", "").expect("filter"));
        assert!(state.column_filters().is_empty());
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let schema = schema();
        let mut state = state();
        assert!(state.toggle_sort(&schema, "id").expect("sort").is_none());

        let spec = state.toggle_sort(&schema, "name").expect("sort").cloned();
        assert_eq!(spec, Some(SortSpec::asc("name")));
        let spec = state.toggle_sort(&schema, "name").expect("sort").cloned();
        assert_eq!(spec.map(|s| s.direction), Some(SortDirection::Desc));
        assert!(state.toggle_sort(&schema, "ghost").is_err());
    }

    #[test]
    fn test_set_sort_matches_header_rules() {
        let schema = schema();
        let mut state = state();
        assert!(matches!(
            state.set_sort(&schema, Some(SortSpec::asc("note"))),
            Err(Error::Invalid { .. })
        ));
        assert!(state.sort().is_none());

        assert!(state.set_sort(&schema, Some(SortSpec::desc("amt"))).expect("sort"));
        assert!(!state.set_sort(&schema, Some(SortSpec::desc("amt"))).expect("sort"));
        assert!(state.set_sort(&schema, None).expect("clear"));
        assert!(!state.set_sort(&schema, None).expect("clear"));
    }

    #[test]
    fn test_fixed_column_cannot_be_hidden() {
        let schema = schema();
        let mut state = state();
        assert!(!state.toggle_column_visibility(&schema, "id").expect("toggle"));
        assert!(state.is_visible("id"));
    }

    #[test]
    fn test_visibility_round_trip() {
        let schema = schema();
        let mut state = state();
        let before = state.visible_set().clone();
        state.toggle_column_visibility(&schema, "note").expect("toggle");
        assert!(!state.is_visible("note"));
        state.toggle_column_visibility(&schema, "note").expect("toggle");
        assert_eq!(state.visible_set(), &before);
    }

    #[test]
    fn test_toggle_all_columns_spares_fixed() {
        let schema = schema();
        let mut state = state();
        state.toggle_all_columns(&schema);
        let keys: Vec<&str> = state
            .visible_columns(&schema)
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, vec!["id"]);

        state.toggle_all_columns(&schema);
        assert_eq!(state.visible_columns(&schema).len(), 4);
    }

    #[test]
    fn test_move_column() {
        let schema = schema();
        let mut state = state();
        assert!(state.move_column(&schema, "amt", "name").expect("move"));
        assert_eq!(state.column_order(), &["id", "amt", "name", "note"]);
        assert!(!state.move_column(&schema, "note", "id").expect("move"));
        assert!(state.move_column(&schema, "note", "ghost").is_err());
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut state = state();
        state.set_page(4).expect("page");
        assert!(state.set_page_size(25).expect("size"));
        assert_eq!(state.page(), 1);
        assert!(state.set_page(0).is_err());
        assert!(state.set_page_size(0).is_err());
    }

    #[test]
    fn test_resize_through_state() {
        let schema = schema();
        let mut state = state();
        {
            let mut session = state.begin_resize(&schema, "amt", 10.0, 40.0).expect("resize");
            session.drag_to(40.0);
            session.finish();
        }
        assert_eq!(state.column_width("amt"), 120.0);
    }

    #[test]
    fn test_reconcile_drops_stale_keys() {
        let mut state = state();
        state.set_column_filter(&schema(), "name", "a").expect("filter");
        state.toggle_sort(&schema(), "name").expect("sort");

        let smaller = ColumnSchema::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("extra", "Extra"),
        ])
        .expect("schema");
        state.reconcile(&smaller);

        assert!(state.column_filters().is_empty());
        assert!(state.sort().is_none());
        assert_eq!(state.column_order(), &["id", "extra"]);
        assert!(state.is_visible("extra"));
    }
}
