//! Aggregates
//!
//! Per-column sums for numeric and currency columns over the filtered, sorted
//! (unpaginated) rows.

use ahash::AHashMap;

use crate::domain::{ColumnSchema, Row};

/// Column key -> sum
pub type Aggregates = AHashMap<String, f64>;

/// Sum every numeric column across `rows`
pub fn aggregates<'a, I>(rows: I, schema: &ColumnSchema) -> Aggregates
where
    I: IntoIterator<Item = &'a Row>,
{
    let numeric: Vec<&str> = schema
        .columns()
        .iter()
        .filter(|c| c.column_type.is_numeric())
        .map(|c| c.key.as_str())
        .collect();

    let mut totals: Aggregates = numeric.iter().map(|k| (k.to_string(), 0.0)).collect();
    if numeric.is_empty() {
        return totals;
    }

    for row in rows {
        for key in &numeric {
            if let Some(sum) = totals.get_mut(*key) {
                *sum += row.get(key).as_number();
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnSpec, ColumnType};

    #[test]
    fn test_sums_numeric_columns_only() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("qty", "Qty").of_type(ColumnType::Number),
            ColumnSpec::new("amt", "Amount").of_type(ColumnType::Currency),
        ])
        .expect("schema");
        let rows = vec![
            Row::new().with("name", "a").with("qty", 2).with("amt", "1,000.50"),
            Row::new().with("name", "b").with("qty", "3").with("amt", "bad"),
            Row::new().with("name", "c"),
        ];

        let totals = aggregates(&rows, &schema);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("qty"), Some(&5.0));
        assert_eq!(totals.get("amt"), Some(&1000.5));
        assert!(!totals.contains_key("name"));
    }

    #[test]
    fn test_empty_rows_give_zero_totals() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("qty", "Qty").of_type(ColumnType::Number),
        ])
        .expect("schema");
        let totals = aggregates(std::iter::empty(), &schema);
        assert_eq!(totals.get("qty"), Some(&0.0));
    }
}
