//! bolt-tables - Bolt graph results as node and edge tables
//!
//! This crate flattens graph query results into two tables for visualization
//! tools:
//! - a nodes table, one row per node, with a `node id` column
//! - an edges table, one row per relationship, with `relationship id`,
//!   `start node id` and `end node id` columns
//!
//! Every other column is a property key seen on at least one element.
//! Temporal property values are stringified on the way out.
//!
//! ```
//! use bolt_tables::bolt::Graph;
//! use bolt_tables::tabular::{nodes_to_table, CellValue};
//!
//! let graph = Graph::from_json_str(
//!     r#"{"nodes": [{"id": 1, "properties": {"name": "Alice"}}]}"#,
//! ).unwrap();
//! let nodes = nodes_to_table(&graph).unwrap();
//! assert_eq!(nodes.get(0, "node id"), Some(&CellValue::Integer(1)));
//! ```

pub mod bolt;
pub mod config;
pub mod tabular;
