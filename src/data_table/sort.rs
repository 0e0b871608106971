//! Sort stage
//!
//! Single-key, type-directed, stable sort. Sort keys are extracted once per
//! row before comparing.

use serde::{Deserialize, Serialize};

use crate::domain::{ColumnSchema, ColumnType, Row, SortKey};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort: one column and a direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Next sort after a header click on `key`: the same column flips from
    /// ascending to descending, anything else starts ascending.
    pub fn after_click(current: Option<&SortSpec>, key: &str) -> Self {
        match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Asc => {
                SortSpec::desc(key)
            }
            _ => SortSpec::asc(key),
        }
    }
}

/// Column type used to order `key`; keys outside the schema compare as text
fn column_type_of(schema: &ColumnSchema, key: &str) -> ColumnType {
    schema.get(key).map_or(ColumnType::Text, |c| c.column_type)
}

/// Stable permutation that orders `rows` under `spec`
pub fn sort_order<'a, I>(rows: I, spec: &SortSpec, schema: &ColumnSchema) -> Vec<usize>
where
    I: IntoIterator<Item = &'a Row>,
{
    let column_type = column_type_of(schema, &spec.key);
    let keys: Vec<SortKey> = rows
        .into_iter()
        .map(|row| column_type.sort_key(row.get(&spec.key)))
        .collect();

    let mut order: Vec<usize> = (0..keys.len()).collect();
    // `sort_by` is stable; flipping the operands keeps ties in input order
    match spec.direction {
        SortDirection::Asc => order.sort_by(|&a, &b| keys[a].cmp(&keys[b])),
        SortDirection::Desc => order.sort_by(|&a, &b| keys[b].cmp(&keys[a])),
    }
    order
}

/// Sort stage entry point. Returns a sorted copy; input order is kept when
/// `spec` is absent.
pub fn sort_rows<'a>(
    rows: &[&'a Row],
    spec: Option<&SortSpec>,
    schema: &ColumnSchema,
) -> Vec<&'a Row> {
    let Some(spec) = spec else {
        return rows.to_vec();
    };
    sort_order(rows.iter().copied(), spec, schema)
        .into_iter()
        .map(|i| rows[i])
        .collect()
}
