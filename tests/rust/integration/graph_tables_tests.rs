//! Integration tests for graph-to-table conversion
//!
//! Covers the in-memory `Graph` as well as a caller-defined graph result
//! whose accessors can fail.

use bolt_tables::bolt::{Graph, GraphNode, GraphRelationship, GraphResult, Node, Relationship};
use bolt_tables::tabular::{
    edges_to_table, graph_to_tables, is_temporal, nodes_to_table, normalize, BoltDuration,
    CellValue, PropertyMap, TemporalValue,
};
use chrono::NaiveDate;
use serde_json::json;

fn props(entries: &[(&str, CellValue)]) -> PropertyMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn social_graph() -> Graph {
    let since = TemporalValue::Date(NaiveDate::from_ymd_opt(2018, 9, 1).unwrap());
    Graph::new(
        vec![
            Node::new(1, vec!["User".to_string()], props(&[("name", "Alice".into())])),
            Node::new(
                2,
                vec!["User".to_string()],
                props(&[("name", "Bob".into()), ("age", 42.into())]),
            ),
            Node::new(3, vec!["Post".to_string()], props(&[("title", "Hello".into())])),
        ],
        vec![
            Relationship::new(
                10,
                1,
                2,
                "FOLLOWS".to_string(),
                props(&[("since", since.into())]),
            ),
            Relationship::new(11, 2, 3, "AUTHORED".to_string(), PropertyMap::new()),
        ],
    )
}

#[test]
fn test_nodes_table_matches_input() {
    let graph = social_graph();
    let table = nodes_to_table(&graph).unwrap();

    assert_eq!(table.len(), graph.nodes.len());
    assert_eq!(table.columns(), &["name", "node id", "age", "title"]);
    for (row, node) in table.rows().zip(&graph.nodes) {
        assert_eq!(row.get("node id"), Some(&CellValue::Integer(node.id)));
    }
    assert_eq!(table.get(0, "age"), Some(&CellValue::Null));
    assert_eq!(table.get(2, "name"), Some(&CellValue::Null));
}

#[test]
fn test_edges_table_matches_input() {
    let graph = social_graph();
    let table = edges_to_table(&graph).unwrap();

    assert_eq!(table.len(), graph.relationships.len());
    for (row, rel) in table.rows().zip(&graph.relationships) {
        assert_eq!(row.get("relationship id"), Some(&CellValue::Integer(rel.id)));
        assert_eq!(
            row.get("start node id"),
            Some(&CellValue::Integer(rel.start_node_id))
        );
        assert_eq!(
            row.get("end node id"),
            Some(&CellValue::Integer(rel.end_node_id))
        );
    }
    assert_eq!(
        table.get(0, "since"),
        Some(&CellValue::String("2018-09-01".to_string()))
    );
}

#[test]
fn test_colliding_property_scenario() {
    let graph = Graph::from_json_str(
        r#"{"nodes": [
            {"id": 1, "properties": {"name": "A"}},
            {"id": 2, "properties": {"name": "B", "node id": "fake"}}
        ]}"#,
    )
    .unwrap();

    let table = nodes_to_table(&graph).unwrap();
    assert_eq!(
        table.to_json_records().unwrap(),
        json!([
            {"name": "A", "node id": 1},
            {"name": "B", "node id": 2}
        ])
    );
}

#[test]
fn test_relationship_endpoint_collisions_are_overridden() {
    let graph = Graph::new(
        vec![],
        vec![Relationship::new(
            5,
            6,
            7,
            "R".to_string(),
            props(&[
                ("start node id", "x".into()),
                ("end node id", "y".into()),
                ("relationship id", "z".into()),
            ]),
        )],
    );

    let table = edges_to_table(&graph).unwrap();
    assert_eq!(table.columns().len(), 3);
    assert_eq!(table.get(0, "relationship id"), Some(&CellValue::Integer(5)));
    assert_eq!(table.get(0, "start node id"), Some(&CellValue::Integer(6)));
    assert_eq!(table.get(0, "end node id"), Some(&CellValue::Integer(7)));
}

#[test]
fn test_converted_tables_export_cleanly() {
    let (nodes, edges) = graph_to_tables(&social_graph()).unwrap();

    for table in [&nodes, &edges] {
        assert!(table.rows().all(|row| !row.cells().iter().any(is_temporal)));
        assert_eq!(normalize(table), *table);
        let mut csv = Vec::new();
        table.write_csv(&mut csv).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert_eq!(text.lines().count(), table.len() + 1);
    }
}

// ========== Fallible graph results ==========

#[derive(Debug, PartialEq)]
struct AccessError(&'static str);

struct FlakyNode {
    id: i64,
    broken: bool,
}

struct FlakyRelationship {
    broken_endpoint: bool,
}

struct FlakyGraph {
    nodes: Vec<FlakyNode>,
    relationships: Vec<FlakyRelationship>,
}

impl GraphNode for FlakyNode {
    type Error = AccessError;

    fn id(&self) -> Result<CellValue, AccessError> {
        Ok(CellValue::Integer(self.id))
    }

    fn properties(&self) -> Result<PropertyMap, AccessError> {
        if self.broken {
            Err(AccessError("node properties unavailable"))
        } else {
            Ok(PropertyMap::new())
        }
    }
}

impl GraphRelationship for FlakyRelationship {
    type Error = AccessError;

    fn id(&self) -> Result<CellValue, AccessError> {
        Ok(CellValue::Integer(1))
    }

    fn start_node_id(&self) -> Result<CellValue, AccessError> {
        Ok(CellValue::Integer(1))
    }

    fn end_node_id(&self) -> Result<CellValue, AccessError> {
        if self.broken_endpoint {
            Err(AccessError("end node detached"))
        } else {
            Ok(CellValue::Integer(2))
        }
    }

    fn properties(&self) -> Result<PropertyMap, AccessError> {
        let mut map = PropertyMap::new();
        map.insert(
            "ttl".to_string(),
            TemporalValue::Duration(BoltDuration::new(0, 0, 30, 0)).into(),
        );
        Ok(map)
    }
}

impl GraphResult for FlakyGraph {
    type Error = AccessError;
    type Node = FlakyNode;
    type Relationship = FlakyRelationship;

    fn nodes(&self) -> impl Iterator<Item = &FlakyNode> {
        self.nodes.iter()
    }

    fn relationships(&self) -> impl Iterator<Item = &FlakyRelationship> {
        self.relationships.iter()
    }
}

#[test]
fn test_node_access_error_propagates_unchanged() {
    let graph = FlakyGraph {
        nodes: vec![
            FlakyNode {
                id: 1,
                broken: false,
            },
            FlakyNode {
                id: 2,
                broken: true,
            },
        ],
        relationships: vec![],
    };

    assert_eq!(
        nodes_to_table(&graph),
        Err(AccessError("node properties unavailable"))
    );
}

#[test]
fn test_endpoint_access_error_propagates_unchanged() {
    let graph = FlakyGraph {
        nodes: vec![],
        relationships: vec![FlakyRelationship {
            broken_endpoint: true,
        }],
    };

    assert_eq!(
        edges_to_table(&graph),
        Err(AccessError("end node detached"))
    );
}

#[test]
fn test_custom_graph_result_converts() {
    let graph = FlakyGraph {
        nodes: vec![],
        relationships: vec![FlakyRelationship {
            broken_endpoint: false,
        }],
    };

    let table = edges_to_table(&graph).unwrap();
    assert_eq!(
        table.get(0, "ttl"),
        Some(&CellValue::String("PT30S".to_string()))
    );
    assert_eq!(table.get(0, "end node id"), Some(&CellValue::Integer(2)));
}
