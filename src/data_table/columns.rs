//! Column visibility and ordering
//!
//! Transforms over the schema only; row data is never touched.

use ahash::AHashSet;

use crate::domain::{ColumnSchema, ColumnSpec};

/// Apply `order` to the schema, then keep members of `visible`.
///
/// Schema columns missing from `order` are appended in declaration order, so a
/// stale order never hides a column.
pub fn visible_columns<'a>(
    schema: &'a ColumnSchema,
    order: &[String],
    visible: &AHashSet<String>,
) -> Vec<&'a ColumnSpec> {
    let ordered = order
        .iter()
        .filter_map(|key| schema.get(key))
        .chain(schema.columns().iter().filter(|c| !order.contains(&c.key)));

    ordered.filter(|c| visible.contains(&c.key)).collect()
}

/// Move `source` to the position held by `target`.
///
/// Returns `false` (no-op) when source equals target or either key is absent.
pub fn reorder(order: &mut Vec<String>, source: &str, target: &str) -> bool {
    if source == target {
        return false;
    }
    let Some(from) = order.iter().position(|k| k == source) else {
        return false;
    };
    let Some(to) = order.iter().position(|k| k == target) else {
        return false;
    };

    let key = order.remove(from);
    order.insert(to, key);
    true
}

/// Flip membership of a key in the visible set.
///
/// Returns whether the key is visible afterwards.
pub fn toggle_visibility(visible: &mut AHashSet<String>, key: &str) -> bool {
    if visible.remove(key) {
        false
    } else {
        visible.insert(key.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnSpec::new("A", "a"),
            ColumnSpec::new("B", "b"),
            ColumnSpec::new("C", "c"),
        ])
        .expect("schema")
    }

    #[test]
    fn test_drag_b_onto_a() {
        let mut keys = order(&["A", "B", "C"]);
        assert!(reorder(&mut keys, "B", "A"));
        assert_eq!(keys, order(&["B", "A", "C"]));
    }

    #[test]
    fn test_drag_forward() {
        let mut keys = order(&["A", "B", "C"]);
        assert!(reorder(&mut keys, "A", "C"));
        assert_eq!(keys, order(&["B", "C", "A"]));
    }

    #[test]
    fn test_reorder_noops() {
        let mut keys = order(&["A", "B", "C"]);
        assert!(!reorder(&mut keys, "B", "B"));
        assert!(!reorder(&mut keys, "Z", "A"));
        assert!(!reorder(&mut keys, "A", "Z"));
        assert_eq!(keys, order(&["A", "B", "C"]));
    }

    #[test]
    fn test_visible_columns_follow_order() {
        let schema = schema();
        let visible: AHashSet<String> = ["A", "C"].iter().map(|k| k.to_string()).collect();
        let cols = visible_columns(&schema, &order(&["C", "B", "A"]), &visible);
        let keys: Vec<&str> = cols.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["C", "A"]);
    }

    #[test]
    fn test_visible_columns_appends_unordered_keys() {
        let schema = schema();
        let visible: AHashSet<String> = schema.keys().map(str::to_string).collect();
        let cols = visible_columns(&schema, &order(&["B"]), &visible);
        let keys: Vec<&str> = cols.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut visible: AHashSet<String> = ["A", "B"].iter().map(|k| k.to_string()).collect();
        let before = visible.clone();
        assert!(!toggle_visibility(&mut visible, "A"));
        assert!(toggle_visibility(&mut visible, "A"));
        assert_eq!(visible, before);
    }
}
