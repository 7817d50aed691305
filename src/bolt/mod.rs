//! Bolt Client Support
//!
//! The pieces of a Bolt client that the table converters touch: the
//! read-only graph result interface, an in-memory graph for dumps, and
//! driver resolution behind the optional `bolt` feature.
//!
//! The wire protocol itself lives in the client library.

pub mod driver;
pub mod errors;
pub mod graph_objects;

pub use driver::{
    resolve_default_driver, resolve_driver, DefaultDriver, DefaultFactory, DriverFactory,
    DriverSpec, MissingClientLibrary,
};
pub use errors::{BoltSupportError, GraphLoadError};
pub use graph_objects::{Graph, GraphNode, GraphRelationship, GraphResult, Node, Relationship};
