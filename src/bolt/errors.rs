//! Bolt Support Error Types
//!
//! Errors raised while resolving a Bolt driver or loading a graph dump.
//! Errors coming out of a caller-supplied graph result are not listed here:
//! the converters hand them back in the graph's own error type.

use thiserror::Error;

/// Remediation shown when Bolt support was not compiled in
pub const CLIENT_LIBRARY_MISSING_MESSAGE: &str = "The neo4rs Bolt client was not found but is required for Bolt driver support. \
     Rebuild with `cargo build --features bolt` (or add `features = [\"bolt\"]` to the bolt-tables dependency).";

/// Driver resolution errors
#[derive(Error, Debug)]
pub enum BoltSupportError {
    /// The optional Bolt client library is not part of this build
    #[error("{}", CLIENT_LIBRARY_MISSING_MESSAGE)]
    ClientLibraryMissing,

    /// Driver configuration failed validation
    #[error("Invalid driver configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    /// The client library rejected the configuration or could not connect
    #[error("Failed to create Bolt driver for {uri}: {message}")]
    Connection { uri: String, message: String },
}

pub type BoltSupportResult<T> = Result<T, BoltSupportError>;

impl BoltSupportError {
    /// Create a new connection error
    pub fn connection<S: Into<String>, M: std::fmt::Display>(uri: S, message: M) -> Self {
        BoltSupportError::Connection {
            uri: uri.into(),
            message: message.to_string(),
        }
    }

    /// Remediation hint for the user, if there is one
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            BoltSupportError::ClientLibraryMissing => Some(CLIENT_LIBRARY_MISSING_MESSAGE),
            _ => None,
        }
    }
}

/// Errors raised while loading a graph dump from disk
#[derive(Error, Debug)]
pub enum GraphLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse graph YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported graph dump format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: String },
}
