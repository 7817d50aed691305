//! Graph-to-Table Conversion
//!
//! Flattens a [`GraphResult`] into a nodes table and an edges table.
//!
//! Each element becomes one row: its properties are copied first, then the
//! synthesized identifier columns are written on top. When a property has
//! the same name as an identifier column, the identifier wins and the
//! property value is dropped (a warning is logged). Rows keep input order,
//! and every table is normalized before it is returned, so no temporal cells
//! remain at the top level.
//!
//! ```text
//! Node {id: 2, properties: {name: "B", "node id": "fake"}}
//!   -> {name: "B", "node id": 2}
//!
//! Relationship {id: 7, start: 1, end: 2, properties: {weight: 0.5}}
//!   -> {weight: 0.5, "relationship id": 7, "start node id": 1, "end node id": 2}
//! ```

use super::table::{Record, Table};
use super::temporal::normalize;
use super::value::{CellValue, PropertyMap};
use crate::bolt::graph_objects::{GraphNode, GraphRelationship, GraphResult};

pub const NODE_ID_COLUMN: &str = "node id";
pub const RELATIONSHIP_ID_COLUMN: &str = "relationship id";
pub const START_NODE_ID_COLUMN: &str = "start node id";
pub const END_NODE_ID_COLUMN: &str = "end node id";

/// Names of the synthesized identifier columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdColumns {
    pub node_id: String,
    pub relationship_id: String,
    pub start_node_id: String,
    pub end_node_id: String,
}

impl Default for IdColumns {
    fn default() -> Self {
        IdColumns {
            node_id: NODE_ID_COLUMN.to_string(),
            relationship_id: RELATIONSHIP_ID_COLUMN.to_string(),
            start_node_id: START_NODE_ID_COLUMN.to_string(),
            end_node_id: END_NODE_ID_COLUMN.to_string(),
        }
    }
}

impl IdColumns {
    /// Underscore-prefixed names used by older exports, unlikely to collide
    /// with user properties.
    pub fn legacy() -> Self {
        IdColumns {
            node_id: "_bolt_node_id_key".to_string(),
            relationship_id: "_bolt_relationship_id".to_string(),
            start_node_id: "_bolt_start_node_id_key".to_string(),
            end_node_id: "_bolt_end_node_id_key".to_string(),
        }
    }
}

/// Nodes table with the default identifier column
pub fn nodes_to_table<G: GraphResult>(graph: &G) -> Result<Table, G::Error> {
    nodes_to_table_with(graph, &IdColumns::default())
}

/// Edges table with the default identifier columns
pub fn edges_to_table<G: GraphResult>(graph: &G) -> Result<Table, G::Error> {
    edges_to_table_with(graph, &IdColumns::default())
}

/// Both tables at once: `(nodes, edges)`
pub fn graph_to_tables<G: GraphResult>(graph: &G) -> Result<(Table, Table), G::Error> {
    let columns = IdColumns::default();
    Ok((
        nodes_to_table_with(graph, &columns)?,
        edges_to_table_with(graph, &columns)?,
    ))
}

pub fn nodes_to_table_with<G: GraphResult>(
    graph: &G,
    columns: &IdColumns,
) -> Result<Table, G::Error> {
    let mut records = Vec::new();
    for node in graph.nodes() {
        let mut record = properties_record(node.properties()?, 1);
        set_id(&mut record, &columns.node_id, node.id()?);
        records.push(record);
    }

    let table = normalize(&Table::from_records(records));
    log::debug!(
        "Converted {} nodes into {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

pub fn edges_to_table_with<G: GraphResult>(
    graph: &G,
    columns: &IdColumns,
) -> Result<Table, G::Error> {
    let mut records = Vec::new();
    for rel in graph.relationships() {
        let mut record = properties_record(rel.properties()?, 3);
        set_id(&mut record, &columns.relationship_id, rel.id()?);
        set_id(&mut record, &columns.start_node_id, rel.start_node_id()?);
        set_id(&mut record, &columns.end_node_id, rel.end_node_id()?);
        records.push(record);
    }

    let table = normalize(&Table::from_records(records));
    log::debug!(
        "Converted {} relationships into {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

fn properties_record(properties: PropertyMap, id_columns: usize) -> Record {
    let mut record = Record::with_capacity(properties.len() + id_columns);
    for (key, value) in properties {
        record.set(key, value);
    }
    record
}

fn set_id(record: &mut Record, column: &str, id: CellValue) {
    if let Some(shadowed) = record.set(column, id) {
        log::warn!(
            "Property `{}` ({}) overwritten by the synthesized identifier column",
            column,
            shadowed.type_name()
        );
    }
}
