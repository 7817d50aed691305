//! Output Table
//!
//! A small row-oriented table: ordered columns, ordered rows, and one cell
//! per (row, column). It is built from a sequence of records whose key sets
//! may differ; the column set is the union of all keys in first-seen order,
//! and a record that lacks a column gets a `Null` cell there.
//!
//! ```text
//! records:  {name: A, node id: 1}
//!           {name: B, age: 3, node id: 2}
//!
//! table:    name | node id | age
//!           A    | 1       | null
//!           B    | 2       | 3
//! ```

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io;

use super::errors::{TableError, TableResult};
use super::value::CellValue;

/// One input row: column name → value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite `key`.
    ///
    /// An existing key keeps its position and gets the new value; the
    /// previous value is returned.
    pub fn set(&mut self, key: impl Into<String>, value: CellValue) -> Option<CellValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

/// Table of nodes or edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    /// Column name → position in `columns`
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Assemble records into a table, filling absent cells with `Null`.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in &records {
            for (key, _) in record.iter() {
                if !index.contains_key(key) {
                    index.insert(key.to_string(), columns.len());
                    columns.push(key.to_string());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = vec![CellValue::Null; columns.len()];
                for (key, value) in record.entries {
                    // every key was registered in the first pass
                    if let Some(&pos) = index.get(&key) {
                        cells[pos] = value;
                    }
                }
                cells
            })
            .collect();

        Table {
            columns,
            index,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<RowRef<'_>> {
        self.rows.get(i).map(|cells| RowRef { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(move |cells| RowRef { table: self, cells })
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let pos = *self.index.get(name)?;
        Some(self.rows.iter().map(|cells| &cells[pos]).collect())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let pos = *self.index.get(column)?;
        self.rows.get(row).map(|cells| &cells[pos])
    }

    /// New table with `f` applied to every cell. Shape and column order are
    /// unchanged.
    pub fn map_cells<F>(&self, mut f: F) -> Table
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        Table {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: self
                .rows
                .iter()
                .map(|cells| cells.iter().map(&mut f).collect())
                .collect(),
        }
    }

    /// Rows as a JSON array of objects, keys in column order.
    pub fn to_json_records(&self) -> TableResult<Value> {
        self.ensure_exportable()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Write a header row followed by one CSV record per row.
    ///
    /// A table without columns writes nothing.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> TableResult<()> {
        self.ensure_exportable()?;

        let mut writer = csv::Writer::from_writer(writer);
        if !self.columns.is_empty() {
            writer.write_record(&self.columns)?;
        }
        for cells in &self.rows {
            let fields = cells
                .iter()
                .map(CellValue::render)
                .collect::<Result<Vec<_>, _>>()?;
            writer.write_record(&fields)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Temporal cells have no export representation, nested ones included.
    fn ensure_exportable(&self) -> TableResult<()> {
        for (row, cells) in self.rows.iter().enumerate() {
            if let Some(pos) = cells.iter().position(CellValue::contains_temporal) {
                return Err(TableError::UnnormalizedTemporal {
                    row,
                    column: self.columns[pos].clone(),
                });
            }
        }
        Ok(())
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let pos = *self.table.index.get(column)?;
        self.cells.get(pos)
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        let (table, cells): (&'a Table, &'a [CellValue]) = (self.table, self.cells);
        table.columns.iter().map(String::as_str).zip(cells.iter())
    }

    /// Owned copy of the row
    pub fn to_record(&self) -> Record {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }
}

struct RowSer<'a>(RowRef<'a>);

impl Serialize for RowSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.cells.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&RowSer(row))?;
        }
        seq.end()
    }
}
