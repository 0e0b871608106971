//! DataTable Engine
//!
//! Wires the pipeline (filter -> sort -> paginate) over an externally owned row
//! source and produces the exact slice the rendering layer paints, together
//! with page counts and column totals. Every user interaction goes through a
//! method here so the view state stays validated and the host gets notified.

use std::collections::BTreeSet;
use std::sync::Arc;

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::{self, Aggregates};
use super::cache::{CacheStats, SortCacheKey, StageCache};
use super::data_provider::{DataProvider, VecDataProvider};
use super::filter::{ColumnFilters, FilterCriteria};
use super::pagination::{self, PageWindow, PaginationDescriptor, PaginationMode};
use super::resize::ResizeSession;
use super::selection::{self, RowId, Selection};
use super::sort::{self, SortSpec};
use crate::domain::{CellValue, ColumnSchema, ColumnSpec, GridConfig, GridFeatures, Row};
use crate::error::{Error, Result};
use crate::eventing::{EventSink, GridEvent};
use crate::i18n::{self, Locale};
use crate::state::ViewState;

/// Data availability reported by the host
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Ready,
    Loading,
    Error(Arc<str>),
}

/// One row of the current page
#[derive(Debug, Clone)]
pub struct PageRow<'a> {
    pub id: RowId,
    pub row: &'a Row,
    pub selected: bool,
}

/// Everything the rendering layer needs to paint one page
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    /// Visible columns in display order
    pub columns: Vec<&'a ColumnSpec>,
    /// Rows of the current page
    pub rows: Vec<PageRow<'a>>,
    /// Rows matching the current search and filters
    pub total_rows: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub window: PageWindow,
    /// Sums of numeric columns over every matching row
    pub aggregates: Aggregates,
    /// Header checkbox state
    pub all_selected: bool,
    pub status: LoadState,
    pub locale: Locale,
}

impl TableView<'_> {
    /// Display text of one cell
    pub fn cell_text(&self, row: &PageRow<'_>, column: &ColumnSpec) -> String {
        column.format(row.row.get(&column.key), self.locale)
    }

    /// Display text of a column total, if the column has one
    pub fn total_text(&self, column: &ColumnSpec) -> Option<String> {
        self.aggregates
            .get(&column.key)
            .map(|sum| column.format(&CellValue::Number(*sum), self.locale))
    }

    /// Placeholder shown instead of rows (loading, error, nothing found)
    pub fn empty_message(&self) -> Option<String> {
        match &self.status {
            LoadState::Loading => Some(i18n::t(self.locale, "table-loading").into_owned()),
            LoadState::Error(message) => Some(format!(
                "{}: {}",
                i18n::t(self.locale, "table-error"),
                message
            )),
            LoadState::Ready if self.rows.is_empty() => {
                Some(i18n::t(self.locale, "table-no-data").into_owned())
            }
            LoadState::Ready => None,
        }
    }

    /// Record count line, e.g. "23 records"
    pub fn summary(&self) -> String {
        format!(
            "{} {}",
            self.total_rows,
            i18n::t(self.locale, "page-records")
        )
    }
}

/// Exported rows: formatted cells of every matching row, visible columns only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The table processing engine
pub struct DataTable<P: DataProvider = VecDataProvider> {
    provider: P,
    schema: ColumnSchema,
    features: GridFeatures,
    locale: Locale,
    row_key: Option<String>,
    min_column_width: f32,
    page_size_options: Vec<usize>,
    view: ViewState,
    selection: Selection,
    mode: PaginationMode,
    load_state: LoadState,
    cache: StageCache,
    events: EventSink,
}

impl<P: DataProvider> DataTable<P> {
    /// Create a grid over `provider` configured by `config`
    pub fn new(provider: P, config: &GridConfig) -> Result<Self> {
        config.validate()?;
        selection::check_unique_keys(provider.rows(), config.row_key.as_deref())?;
        let schema = config.schema()?;
        let view = ViewState::new(&schema, config.page_size)?;
        let mode = if config.features.paginated {
            PaginationMode::Client
        } else {
            PaginationMode::Disabled
        };

        info!(
            columns = schema.len(),
            rows = provider.len(),
            page_size = config.page_size,
            "Data table created"
        );

        Ok(Self {
            provider,
            schema,
            features: config.features,
            locale: config.locale(),
            row_key: config.row_key.clone(),
            min_column_width: config.min_column_width,
            page_size_options: config.page_size_options.clone(),
            view,
            selection: Selection::new(),
            mode,
            load_state: LoadState::default(),
            cache: StageCache::new(config.cache_capacity),
            events: EventSink::none(),
        })
    }

    /// Deliver notifications to `tx`
    pub fn with_events(mut self, tx: Sender<GridEvent>) -> Self {
        self.events = EventSink::new(tx);
        self
    }

    /// Switch to server-driven paging: the provider holds only the current page.
    ///
    /// Selection then spans pages, so a selectable grid needs a `row_key`.
    pub fn with_server_pagination(mut self, descriptor: PaginationDescriptor) -> Result<Self> {
        if self.features.selectable && self.row_key.is_none() {
            return Err(Error::Invalid {
                message: "Server pagination with selection requires a row_key".to_string(),
            });
        }
        self.view.set_page_size(descriptor.page_size)?;
        self.view.set_page(descriptor.page)?;
        self.mode = PaginationMode::Server {
            total: descriptor.total,
        };
        Ok(self)
    }

    // ==================== Getters ====================

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn features(&self) -> GridFeatures {
        self.features
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn pagination_mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ==================== Data Source ====================

    /// Replace the row source. Memoized results are dropped and selections of
    /// rows that disappeared are forgotten. In server mode the new rows are just
    /// another page, so selections on other pages are kept.
    pub fn set_provider(&mut self, provider: P) -> Result<()> {
        selection::check_unique_keys(provider.rows(), self.row_key.as_deref())?;
        self.provider = provider;
        self.cache.clear();
        if !matches!(self.mode, PaginationMode::Server { .. }) {
            let existing = self.row_ids();
            self.selection.retain_existing(&existing);
        }
        self.load_state = LoadState::Ready;
        debug!(rows = self.provider.len(), "Row source replaced");
        Ok(())
    }

    /// Update the total reported by the server in server-driven mode
    pub fn set_server_total(&mut self, total: usize) {
        if let PaginationMode::Server { .. } = self.mode {
            self.mode = PaginationMode::Server { total };
        }
    }

    /// Replace the column schema, dropping view state for removed columns
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) -> Result<()> {
        let schema = ColumnSchema::new(columns)?;
        if let Some(key) = &self.row_key {
            schema.require(key)?;
        }
        self.view.reconcile(&schema);
        self.schema = schema;
        self.cache.clear();
        Ok(())
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.load_state = if loading {
            LoadState::Loading
        } else {
            LoadState::Ready
        };
    }

    pub fn set_error(&mut self, message: impl Into<Arc<str>>) {
        self.load_state = LoadState::Error(message.into());
    }

    // ==================== Search, Filter, Sort ====================

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if !self.features.searchable {
            return;
        }
        if self.view.set_search_term(term) {
            self.events.emit(GridEvent::SearchChanged {
                term: self.view.search_term().to_string(),
            });
        }
    }

    /// Edit one column filter; an empty value clears it
    pub fn set_column_filter(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        if !self.features.filterable {
            return Ok(());
        }
        if self.view.set_column_filter(&self.schema, key, value)? {
            self.emit_filters();
        }
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        if self.view.clear_filters() {
            self.emit_filters();
        }
    }

    fn emit_filters(&self) {
        self.events.emit(GridEvent::FiltersChanged {
            filters: self.view.column_filters().clone(),
        });
    }

    /// Header click on `key`
    pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
        if let Some(sort) = self.view.toggle_sort(&self.schema, key)?.cloned() {
            self.events.emit(GridEvent::SortChanged { sort: Some(sort) });
        }
        Ok(())
    }

    /// Set or clear the sort directly
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        if self.view.set_sort(&self.schema, sort.clone())? {
            self.events.emit(GridEvent::SortChanged { sort });
        }
        Ok(())
    }

    // ==================== Pagination ====================

    /// Go to a 1-based page. Without pagination everything is on page 1.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if self.mode == PaginationMode::Disabled {
            if page == 0 {
                return Err(Error::InvalidPage { page });
            }
            return Ok(());
        }
        if self.view.set_page(page)? {
            self.events.emit(GridEvent::PageChanged { page });
        }
        Ok(())
    }

    /// Advance one page unless already on the last one
    pub fn next_page(&mut self) -> Result<bool> {
        let page = self.view.page();
        if page >= self.total_pages() {
            return Ok(false);
        }
        self.set_page(page + 1)?;
        Ok(true)
    }

    /// Go back one page unless already on the first one
    pub fn prev_page(&mut self) -> Result<bool> {
        let page = self.view.page();
        if page <= 1 {
            return Ok(false);
        }
        self.set_page(page - 1)?;
        Ok(true)
    }

    /// Change the page size; the page returns to 1
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if self.view.set_page_size(page_size)? {
            self.events.emit(GridEvent::PageSizeChanged { page_size });
        }
        Ok(())
    }

    /// Number of matching rows (or the server total)
    pub fn total_rows(&mut self) -> usize {
        match self.mode {
            PaginationMode::Server { total } => total,
            PaginationMode::Client | PaginationMode::Disabled => self.processed().len(),
        }
    }

    pub fn total_pages(&mut self) -> usize {
        match self.mode {
            PaginationMode::Disabled => 1,
            PaginationMode::Client | PaginationMode::Server { .. } => {
                let total = self.total_rows();
                pagination::total_pages(total, self.view.page_size())
            }
        }
    }

    // ==================== Columns ====================

    pub fn toggle_column_visibility(&mut self, key: &str) -> Result<()> {
        if self.view.toggle_column_visibility(&self.schema, key)? {
            self.emit_columns();
        }
        Ok(())
    }

    pub fn toggle_all_columns(&mut self) {
        self.view.toggle_all_columns(&self.schema);
        self.emit_columns();
    }

    /// Drag-reorder: move `source` to the position of `target`
    pub fn move_column(&mut self, source: &str, target: &str) -> Result<()> {
        if self.view.move_column(&self.schema, source, target)? {
            self.emit_columns();
        }
        Ok(())
    }

    fn emit_columns(&self) {
        let visible = self
            .view
            .visible_columns(&self.schema)
            .iter()
            .map(|c| c.key.clone())
            .collect();
        self.events.emit(GridEvent::ColumnsChanged { visible });
    }

    /// Start a column resize drag
    pub fn begin_resize(&mut self, key: &str, start_x: f32) -> Result<ResizeSession<'_>> {
        self.view
            .begin_resize(&self.schema, key, start_x, self.min_column_width)
    }

    // ==================== Selection ====================

    fn row_id(&self, row: &Row, position: usize) -> RowId {
        RowId::of(row, position, self.row_key.as_deref())
    }

    fn row_ids(&self) -> BTreeSet<RowId> {
        self.provider
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| self.row_id(row, i))
            .collect()
    }

    /// Flip selection of one row. Returns whether it is selected afterwards.
    pub fn toggle_row(&mut self, id: RowId) -> Result<bool> {
        if !self.features.selectable {
            return Ok(false);
        }
        if !self.row_ids().contains(&id) {
            return Err(Error::Invalid {
                message: format!("Unknown row: {id:?}"),
            });
        }
        let selected = self.selection.toggle(id);
        self.emit_selection();
        Ok(selected)
    }

    /// Header checkbox: select the whole current page, or clear it when it is
    /// already fully selected
    pub fn toggle_page_selection(&mut self) {
        if !self.features.selectable {
            return;
        }
        let page_ids: Vec<RowId> = self.view().rows.into_iter().map(|r| r.id).collect();
        self.selection.toggle_page(&page_ids);
        self.emit_selection();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.emit_selection();
    }

    fn emit_selection(&self) {
        self.events.emit(GridEvent::SelectionChanged {
            selected: self.selection.ids(),
        });
    }

    /// Selected rows in source order
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.provider
            .rows()
            .iter()
            .enumerate()
            .filter(|(i, row)| self.selection.is_selected(&self.row_id(row, *i)))
            .map(|(_, row)| row)
            .collect()
    }

    // ==================== Host Actions ====================

    pub fn request_refresh(&self) {
        self.events.emit(GridEvent::RefreshRequested);
    }

    /// Export every matching row (not just the current page). `None` when the
    /// grid is not exportable.
    pub fn export(&mut self) -> Option<ExportTable> {
        if !self.features.exportable {
            return None;
        }
        self.events.emit(GridEvent::ExportRequested);

        let processed = self.processed();
        let rows = self.provider.rows();
        let columns = self.view.visible_columns(&self.schema);
        let table = ExportTable {
            headers: columns.iter().map(|c| c.label.clone()).collect(),
            rows: processed
                .iter()
                .map(|&i| {
                    columns
                        .iter()
                        .map(|c| c.format(rows[i].get(&c.key), self.locale))
                        .collect()
                })
                .collect(),
        };
        info!(rows = table.rows.len(), "Export prepared");
        Some(table)
    }

    // ==================== Pipeline ====================

    /// Filter inputs after feature switches are applied
    fn criteria(&self) -> FilterCriteria {
        let search = if self.features.searchable {
            self.view.search_term()
        } else {
            ""
        };
        if self.features.filterable {
            FilterCriteria::new(search, self.view.column_filters())
        } else {
            FilterCriteria::new(search, &ColumnFilters::new())
        }
    }

    /// Source positions of the filtered, sorted rows
    fn processed(&mut self) -> Arc<[usize]> {
        let criteria = self.criteria();
        let rows = self.provider.rows();

        let filtered = self.cache.filtered(&criteria, || {
            rows.iter()
                .enumerate()
                .filter(|(_, row)| criteria.matches(row))
                .map(|(i, _)| i)
                .collect()
        });

        let sort = self.view.sort().cloned();
        let schema = &self.schema;
        let key = SortCacheKey {
            criteria,
            sort: sort.clone(),
        };
        self.cache.sorted(key, || match &sort {
            None => filtered.to_vec(),
            Some(spec) => sort::sort_order(filtered.iter().map(|&i| &rows[i]), spec, schema)
                .into_iter()
                .map(|p| filtered[p])
                .collect(),
        })
    }

    /// Compute the current page
    pub fn view(&mut self) -> TableView<'_> {
        let processed = self.processed();
        let rows = self.provider.rows();
        let page = match self.mode {
            PaginationMode::Disabled => 1,
            PaginationMode::Client | PaginationMode::Server { .. } => self.view.page(),
        };
        let page_size = self.view.page_size();

        let (range, total_rows, total_pages) = match self.mode {
            PaginationMode::Client => (
                pagination::page_range(processed.len(), page, page_size),
                processed.len(),
                pagination::total_pages(processed.len(), page_size),
            ),
            PaginationMode::Server { total } => (
                0..processed.len(),
                total,
                pagination::total_pages(total, page_size),
            ),
            PaginationMode::Disabled => (0..processed.len(), processed.len(), 1),
        };

        let page_rows: Vec<PageRow<'_>> = processed[range]
            .iter()
            .map(|&i| {
                let row = &rows[i];
                let id = self.row_id(row, i);
                PageRow {
                    selected: self.selection.is_selected(&id),
                    id,
                    row,
                }
            })
            .collect();

        let page_ids: Vec<RowId> = page_rows.iter().map(|r| r.id.clone()).collect();
        let all_selected = self.selection.is_page_selected(&page_ids);
        let aggregates = aggregate::aggregates(processed.iter().map(|&i| &rows[i]), &self.schema);

        TableView {
            columns: self.view.visible_columns(&self.schema),
            rows: page_rows,
            total_rows,
            total_pages,
            page,
            page_size,
            window: pagination::page_window(page, total_pages),
            aggregates,
            all_selected,
            status: self.load_state.clone(),
            locale: self.locale,
        }
    }
}

impl DataTable<VecDataProvider> {
    /// Convenience constructor over an owned row vector
    pub fn from_rows(rows: Vec<Row>, config: &GridConfig) -> Result<Self> {
        Self::new(VecDataProvider::new(rows), config)
    }
}
