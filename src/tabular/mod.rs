//! Tabular output for graph query results
//!
//! Cell values, the output table, temporal normalization, and the
//! node/edge converters.

pub mod convert;
pub mod errors;
pub mod table;
pub mod temporal;
pub mod value;

pub use convert::{
    edges_to_table, edges_to_table_with, graph_to_tables, nodes_to_table, nodes_to_table_with,
    IdColumns,
};
pub use errors::TableError;
pub use table::{Record, RowRef, Table};
pub use temporal::{is_temporal, normalize};
pub use value::{BoltDuration, CellValue, PropertyMap, TemporalValue};
