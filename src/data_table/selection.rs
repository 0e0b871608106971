//! Row selection
//!
//! Selection is keyed by a stable row identity, so it survives re-sorting and
//! paging. Identity comes from the configured key column, or from the row's
//! position in the source collection when no key column is set.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::domain::Row;
use crate::error::{Error, Result};

/// Stable row identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RowId {
    /// String form of the key column
    Key(String),
    /// Position in the source collection
    Position(usize),
}

impl RowId {
    /// Resolve the identity of `row` found at `position` in the source
    pub fn of(row: &Row, position: usize, row_key: Option<&str>) -> Self {
        match row_key {
            Some(key) if !row.get(key).is_null() => RowId::Key(row.get(key).to_text().into_owned()),
            _ => RowId::Position(position),
        }
    }
}

/// Reject row sources where two rows resolve to the same key identity.
///
/// Keys compare by their text, so a number `1` and a text `"1"` collide.
pub fn check_unique_keys(rows: &[Row], row_key: Option<&str>) -> Result<()> {
    let Some(key) = row_key else {
        return Ok(());
    };
    let mut seen = BTreeSet::new();
    for (position, row) in rows.iter().enumerate() {
        if let RowId::Key(id) = RowId::of(row, position, Some(key)) {
            if !seen.insert(id.clone()) {
                warn!(column = key, value = %id, position, "Duplicate row key");
                return Err(Error::Invalid {
                    message: format!("Duplicate value `{id}` in row key column `{key}`"),
                });
            }
        }
    }
    Ok(())
}

/// Set of selected rows
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: BTreeSet<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// "Select all" for the current page: clear the page when every row on it
    /// is selected, otherwise select the whole page.
    pub fn toggle_page(&mut self, page_ids: &[RowId]) {
        if self.is_page_selected(page_ids) {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(page_ids.iter().cloned());
        }
    }

    /// Whether the page is non-empty and fully selected
    pub fn is_page_selected(&self, page_ids: &[RowId]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id))
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Drop identities that no longer exist
    pub fn retain_existing(&mut self, existing: &BTreeSet<RowId>) {
        self.selected.retain(|id| existing.contains(id));
    }

    /// Selected ids in order
    pub fn ids(&self) -> Vec<RowId> {
        self.selected.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<usize>) -> Vec<RowId> {
        range.map(RowId::Position).collect()
    }

    #[test]
    fn test_toggle_row() {
        let mut selection = Selection::new();
        assert!(selection.toggle(RowId::Position(1)));
        assert!(selection.is_selected(&RowId::Position(1)));
        assert!(!selection.toggle(RowId::Position(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_page_selects_then_clears() {
        let mut selection = Selection::new();
        let page = ids(0..3);
        selection.toggle(RowId::Position(1));

        selection.toggle_page(&page);
        assert!(selection.is_page_selected(&page));
        assert_eq!(selection.len(), 3);

        selection.toggle_page(&page);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_page_keeps_other_pages() {
        let mut selection = Selection::new();
        selection.toggle(RowId::Position(10));
        selection.toggle_page(&ids(0..2));
        selection.toggle_page(&ids(0..2));
        assert_eq!(selection.ids(), vec![RowId::Position(10)]);
    }

    #[test]
    fn test_empty_page_never_counts_as_selected() {
        let selection = Selection::new();
        assert!(!selection.is_page_selected(&[]));
    }

    #[test]
    fn test_row_id_prefers_key_column() {
        let row = Row::new().with("id", 42).with("name", "x");
        assert_eq!(RowId::of(&row, 7, Some("id")), RowId::Key("42".to_string()));
        assert_eq!(RowId::of(&row, 7, Some("missing")), RowId::Position(7));
        assert_eq!(RowId::of(&row, 7, None), RowId::Position(7));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let rows = vec![Row::new().with("id", 1), Row::new().with("id", "1")];
        assert!(matches!(
            check_unique_keys(&rows, Some("id")),
            Err(Error::Invalid { .. })
        ));
        assert!(check_unique_keys(&rows, None).is_ok());
    }

    #[test]
    fn test_null_keys_do_not_collide() {
        let rows = vec![
            Row::new().with("id", 1),
            Row::new().with("name", "a"),
            Row::new().with("name", "b"),
        ];
        assert!(check_unique_keys(&rows, Some("id")).is_ok());
    }

    #[test]
    fn test_retain_existing() {
        let mut selection = Selection::new();
        selection.toggle(RowId::Position(1));
        selection.toggle(RowId::Position(2));
        let existing: BTreeSet<RowId> = [RowId::Position(2)].into_iter().collect();
        selection.retain_existing(&existing);
        assert_eq!(selection.ids(), vec![RowId::Position(2)]);
    }
}
