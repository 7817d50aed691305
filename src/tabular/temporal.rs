//! Temporal Value Normalization
//!
//! Exporters cannot represent database temporal values, so converted tables
//! are passed through [`normalize`], which swaps every temporal cell for its
//! ISO-8601 string. Only top-level cells are inspected; a list holding
//! temporal values is left as it is.

use super::table::Table;
use super::value::CellValue;

/// True iff the cell holds a database temporal value
pub fn is_temporal(value: &CellValue) -> bool {
    matches!(value, CellValue::Temporal(_))
}

/// Copy of `table` with each temporal cell replaced by its string form.
///
/// Idempotent: the replacement strings are never temporal.
pub fn normalize(table: &Table) -> Table {
    table.map_cells(|cell| match cell {
        CellValue::Temporal(t) => CellValue::String(t.to_string()),
        other => other.clone(),
    })
}
