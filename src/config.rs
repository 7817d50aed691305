use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// URI schemes understood by Bolt clients
pub const BOLT_SCHEMES: &[&str] = &["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// Connection parameters for building a Bolt driver
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// Server URI, e.g. "bolt://localhost:7687"
    #[validate(
        length(min = 1, message = "Bolt URI cannot be empty"),
        custom(function = "validate_bolt_uri")
    )]
    pub uri: String,

    /// Basic auth as (user, password)
    pub auth: Option<(String, String)>,

    /// Target database; the server default when absent
    pub database: Option<String>,

    /// Records pulled per round trip
    #[validate(range(
        min = 1,
        max = 100000,
        message = "Fetch size must be between 1 and 100000"
    ))]
    pub fetch_size: usize,

    /// Connection pool size
    #[validate(range(
        min = 1,
        max = 512,
        message = "Max connections must be between 1 and 512"
    ))]
    pub max_connections: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            auth: None,
            database: None,
            fetch_size: 200,
            max_connections: 16,
        }
    }
}

impl DriverConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth = match env::var("BOLT_USER") {
            Ok(user) => Some((user, env::var("BOLT_PASSWORD").unwrap_or_default())),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };

        let config = Self {
            uri: env::var("BOLT_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            auth,
            database: env::var("BOLT_DATABASE").ok().filter(|db| !db.is_empty()),
            fetch_size: parse_env_var("BOLT_FETCH_SIZE", "200")?,
            max_connections: parse_env_var("BOLT_MAX_CONNECTIONS", "16")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// User name, if auth is configured
    pub fn user(&self) -> Option<&str> {
        self.auth.as_ref().map(|(user, _)| user.as_str())
    }
}

fn validate_bolt_uri(uri: &str) -> Result<(), ValidationError> {
    let scheme = uri.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some(scheme) if BOLT_SCHEMES.contains(&scheme) => Ok(()),
        _ => {
            let mut err = ValidationError::new("bolt_uri");
            err.message = Some(
                format!(
                    "URI must start with one of: {}",
                    BOLT_SCHEMES
                        .iter()
                        .map(|s| format!("{}://", s))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
                .into(),
            );
            Err(err)
        }
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
