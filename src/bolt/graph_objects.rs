//! Bolt Graph Objects
//!
//! The converters only need a small, read-only view of a query result:
//! ordered nodes, ordered relationships, identifiers and property maps.
//! That view is the [`GraphResult`] trait family. Any result type (a driver's
//! own row stream, a cached dump, a test fixture) can implement it; accessor
//! failures surface through the implementor's own `Error` type.
//!
//! [`Graph`], [`Node`] and [`Relationship`] are the in-memory implementation
//! used for dumps loaded from JSON or YAML.
//!
//! # Dump Format
//!
//! ```json
//! {
//!   "nodes": [
//!     {"id": 1, "labels": ["User"], "properties": {"name": "Alice"}}
//!   ],
//!   "relationships": [
//!     {"id": 7, "start_node_id": 1, "end_node_id": 2, "type": "FOLLOWS",
//!      "properties": {"weight": 0.5}}
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::convert::Infallible;
use std::path::Path;

use super::errors::GraphLoadError;
use crate::tabular::value::{CellValue, PropertyMap};

/// Read access to one node of a query result
pub trait GraphNode {
    type Error;

    fn id(&self) -> Result<CellValue, Self::Error>;

    fn properties(&self) -> Result<PropertyMap, Self::Error>;
}

/// Read access to one relationship of a query result.
///
/// Endpoints are node identifiers, not owned nodes.
pub trait GraphRelationship {
    type Error;

    fn id(&self) -> Result<CellValue, Self::Error>;

    fn start_node_id(&self) -> Result<CellValue, Self::Error>;

    fn end_node_id(&self) -> Result<CellValue, Self::Error>;

    fn properties(&self) -> Result<PropertyMap, Self::Error>;
}

/// A graph-shaped query result
pub trait GraphResult {
    type Error;
    type Node: GraphNode<Error = Self::Error>;
    type Relationship: GraphRelationship<Error = Self::Error>;

    /// Nodes in result order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Relationships in result order
    fn relationships(&self) -> impl Iterator<Item = &Self::Relationship>;
}

/// Bolt Node
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// Database-assigned identifier
    pub id: i64,
    /// Node labels (e.g., ["User", "Person"])
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Bolt Relationship
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relationship {
    pub id: i64,
    pub start_node_id: i64,
    pub end_node_id: i64,
    /// Relationship type (e.g., "FOLLOWS", "AUTHORED")
    #[serde(rename = "type", default)]
    pub rel_type: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Fully materialized graph result
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Node {
    pub fn new(id: i64, labels: Vec<String>, properties: PropertyMap) -> Self {
        Node {
            id,
            labels,
            properties,
        }
    }
}

impl Relationship {
    pub fn new(
        id: i64,
        start_node_id: i64,
        end_node_id: i64,
        rel_type: String,
        properties: PropertyMap,
    ) -> Self {
        Relationship {
            id,
            start_node_id,
            end_node_id,
            rel_type,
            properties,
        }
    }
}

impl Graph {
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        Graph {
            nodes,
            relationships,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, GraphLoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a dump, picking the parser from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GraphLoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let graph = match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(GraphLoadError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        log::debug!(
            "Loaded graph dump {}: {} nodes, {} relationships",
            path.display(),
            graph.nodes.len(),
            graph.relationships.len()
        );
        Ok(graph)
    }
}

impl GraphNode for Node {
    type Error = Infallible;

    fn id(&self) -> Result<CellValue, Infallible> {
        Ok(CellValue::Integer(self.id))
    }

    fn properties(&self) -> Result<PropertyMap, Infallible> {
        Ok(self.properties.clone())
    }
}

impl GraphRelationship for Relationship {
    type Error = Infallible;

    fn id(&self) -> Result<CellValue, Infallible> {
        Ok(CellValue::Integer(self.id))
    }

    fn start_node_id(&self) -> Result<CellValue, Infallible> {
        Ok(CellValue::Integer(self.start_node_id))
    }

    fn end_node_id(&self) -> Result<CellValue, Infallible> {
        Ok(CellValue::Integer(self.end_node_id))
    }

    fn properties(&self) -> Result<PropertyMap, Infallible> {
        Ok(self.properties.clone())
    }
}

impl GraphResult for Graph {
    type Error = Infallible;
    type Node = Node;
    type Relationship = Relationship;

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }
}
