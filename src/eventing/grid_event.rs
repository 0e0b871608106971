//! GridEvent - Grid Notification Enum
//!
//! Notifications sent from the grid to its host. They are fire-and-forget:
//! the grid never waits for the host to act on them.

use crossbeam_channel::Sender;
use tracing::debug;

use crate::data_table::filter::ColumnFilters;
use crate::data_table::selection::RowId;
use crate::data_table::sort::SortSpec;

/// Grid events for grid -> host communication
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Global search term edited
    SearchChanged { term: String },

    /// Sort column or direction changed; `None` when the sort was cleared
    SortChanged { sort: Option<SortSpec> },

    /// Column filter set changed (complete mapping)
    FiltersChanged { filters: ColumnFilters },

    /// Page position changed
    PageChanged { page: usize },

    /// Page size changed
    PageSizeChanged { page_size: usize },

    /// Row selection changed
    SelectionChanged { selected: Vec<RowId> },

    /// Column visibility or order changed (visible keys in display order)
    ColumnsChanged { visible: Vec<String> },

    /// Export requested
    ExportRequested,

    /// Reload requested
    RefreshRequested,
}

/// Optional outbound channel for grid events
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<GridEvent>>,
}

impl EventSink {
    /// Sink delivering to `tx`
    pub fn new(tx: Sender<GridEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Sink that discards everything
    pub fn none() -> Self {
        Self::default()
    }

    /// Deliver an event; a dropped receiver is not an error
    pub fn emit(&self, event: GridEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.send(event) {
            debug!(event = ?e.into_inner(), "Grid event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_emit_delivers() {
        let (tx, rx) = unbounded();
        let sink = EventSink::new(tx);
        sink.emit(GridEvent::PageChanged { page: 2 });
        assert_eq!(rx.try_recv().expect("event"), GridEvent::PageChanged { page: 2 });
    }

    #[test]
    fn test_emit_after_receiver_dropped() {
        let (tx, rx) = unbounded();
        drop(rx);
        let sink = EventSink::new(tx);
        sink.emit(GridEvent::RefreshRequested);
    }

    #[test]
    fn test_none_sink_is_silent() {
        EventSink::none().emit(GridEvent::ExportRequested);
    }
}
