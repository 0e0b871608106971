//! Filter stage
//!
//! Global search plus per-column substring filters, all case-insensitive and
//! combined with logical AND.

use std::collections::BTreeMap;

use crate::domain::Row;

/// Active per-column filters (column key -> substring)
pub type ColumnFilters = BTreeMap<String, String>;

/// Normalized filter inputs. Doubles as the memoization key of the stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    search: String,
    columns: Vec<(String, String)>,
}

impl FilterCriteria {
    /// Build criteria from the raw search term and column filters.
    ///
    /// Empty filter values are dropped.
    pub fn new(search_term: &str, column_filters: &ColumnFilters) -> Self {
        Self {
            search: search_term.to_lowercase(),
            columns: column_filters
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key.clone(), value.to_lowercase()))
                .collect(),
        }
    }

    /// True when no row would be excluded
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.columns.is_empty()
    }

    /// Check a single row against the search term and every column filter
    pub fn matches(&self, row: &Row) -> bool {
        if !self.search.is_empty()
            && !row
                .values()
                .any(|value| value.to_lower_text().contains(&self.search))
        {
            return false;
        }

        self.columns
            .iter()
            .all(|(key, needle)| row.get(key).to_lower_text().contains(needle.as_str()))
    }
}

/// Keep the rows matching `criteria`, preserving input order
pub fn filter_rows<'a, I>(rows: I, criteria: &FilterCriteria) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter().filter(|row| criteria.matches(row)).collect()
}

/// Filter stage entry point
pub fn filter<'a, I>(rows: I, column_filters: &ColumnFilters, search_term: &str) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    filter_rows(rows, &FilterCriteria::new(search_term, column_filters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "Jane Doe").with("status", "Active"),
            Row::new().with("id", 2).with("name", "John Roe").with("status", "Active"),
            Row::new().with("id", 3).with("name", "Jane Poe").with("status", "Inactive"),
            Row::new().with("id", 4).with("name", "Mary Major"),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.get("id").to_text().into_owned()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = rows();
        let result = filter(&data, &ColumnFilters::new(), "JANE");
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_search_matches_numbers() {
        let data = rows();
        let result = filter(&data, &ColumnFilters::new(), "4");
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_search_and_column_filter_compose() {
        let data = rows();
        let filters = ColumnFilters::from([("status".to_string(), "Active".to_string())]);
        let result = filter(&data, &filters, "jane");
        // "Inactive" contains "active", so row 3 passes the column filter too
        assert_eq!(ids(&result), vec!["1", "3"]);

        let filters = ColumnFilters::from([("status".to_string(), "inact".to_string())]);
        let result = filter(&data, &filters, "jane");
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_missing_field_reads_as_empty() {
        let data = rows();
        let filters = ColumnFilters::from([("status".to_string(), "a".to_string())]);
        let result = filter(&data, &filters, "");
        assert!(!ids(&result).contains(&"4".to_string()));
    }

    #[test]
    fn test_empty_filter_values_ignored() {
        let filters = ColumnFilters::from([("status".to_string(), String::new())]);
        let criteria = FilterCriteria::new("", &filters);
        assert!(criteria.is_empty());
        let data = rows();
        assert_eq!(filter_rows(&data, &criteria).len(), 4);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let data = rows();
        assert!(filter(&data, &ColumnFilters::new(), "foo").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = rows();
        let filters = ColumnFilters::from([("status".to_string(), "active".to_string())]);
        let once = filter(&data, &filters, "j");
        let twice = filter(once.iter().copied(), &filters, "j");
        assert_eq!(once, twice);
    }
}
