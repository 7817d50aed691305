//! Bolt Driver Resolution
//!
//! Callers may hand over nothing, a driver they already built, or a
//! [`DriverConfig`] describing how to build one. [`resolve_driver`] turns any
//! of those into an `Option` of a usable driver.
//!
//! The Bolt client library (`neo4rs`) is optional and only compiled with the
//! `bolt` cargo feature. Driver construction goes through a
//! [`DriverFactory`], so the conversion code never links against the client
//! library. Without the feature the default factory is
//! [`MissingClientLibrary`], whose driver type has no values and which fails
//! every request with [`BoltSupportError::ClientLibraryMissing`].

use async_trait::async_trait;
use validator::Validate;

use super::errors::{BoltSupportError, BoltSupportResult};
use crate::config::DriverConfig;

/// What the caller asked for when a driver was requested
#[derive(Debug, Clone)]
pub enum DriverSpec<D> {
    /// An already constructed driver, returned unchanged
    Handle(D),
    /// Connection parameters for a new driver
    Config(DriverConfig),
}

impl<D> From<DriverConfig> for DriverSpec<D> {
    fn from(config: DriverConfig) -> Self {
        DriverSpec::Config(config)
    }
}

/// Builds driver handles from connection parameters
#[async_trait]
pub trait DriverFactory: Send + Sync {
    type Driver: Send;

    /// Fails when the client library backing this factory is unavailable.
    fn ensure_available(&self) -> BoltSupportResult<()> {
        Ok(())
    }

    async fn connect(&self, config: &DriverConfig) -> BoltSupportResult<Self::Driver>;
}

/// Resolve a requested driver.
///
/// - `None` resolves to `None` without touching the factory.
/// - A handle is returned unchanged.
/// - A config is validated, then passed to the factory.
///
/// Availability of the client library is checked first for both handles and
/// configs.
pub async fn resolve_driver<F: DriverFactory>(
    factory: &F,
    request: Option<DriverSpec<F::Driver>>,
) -> BoltSupportResult<Option<F::Driver>> {
    let Some(request) = request else {
        return Ok(None);
    };

    factory.ensure_available()?;

    match request {
        DriverSpec::Handle(driver) => Ok(Some(driver)),
        DriverSpec::Config(config) => {
            config.validate()?;
            log::info!("Creating Bolt driver for {}", config.uri);
            let driver = factory.connect(&config).await?;
            Ok(Some(driver))
        }
    }
}

/// Resolve with the factory this build was compiled with.
pub async fn resolve_default_driver(
    request: Option<DriverSpec<DefaultDriver>>,
) -> BoltSupportResult<Option<DefaultDriver>> {
    resolve_driver(&DefaultFactory::default(), request).await
}

#[cfg(feature = "bolt")]
pub type DefaultFactory = Neo4rsFactory;

#[cfg(not(feature = "bolt"))]
pub type DefaultFactory = MissingClientLibrary;

pub type DefaultDriver = <DefaultFactory as DriverFactory>::Driver;

/// Stand-in factory for builds without the `bolt` feature
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingClientLibrary;

/// Driver type of [`MissingClientLibrary`]; it has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDriver {}

#[async_trait]
impl DriverFactory for MissingClientLibrary {
    type Driver = NoDriver;

    fn ensure_available(&self) -> BoltSupportResult<()> {
        Err(BoltSupportError::ClientLibraryMissing)
    }

    async fn connect(&self, _config: &DriverConfig) -> BoltSupportResult<NoDriver> {
        Err(BoltSupportError::ClientLibraryMissing)
    }
}

/// Factory backed by the `neo4rs` client
#[cfg(feature = "bolt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Neo4rsFactory;

#[cfg(feature = "bolt")]
#[async_trait]
impl DriverFactory for Neo4rsFactory {
    type Driver = neo4rs::Graph;

    async fn connect(&self, config: &DriverConfig) -> BoltSupportResult<neo4rs::Graph> {
        let mut builder = neo4rs::ConfigBuilder::default()
            .uri(config.uri.as_str())
            .fetch_size(config.fetch_size)
            .max_connections(config.max_connections);
        if let Some((user, password)) = &config.auth {
            builder = builder.user(user.as_str()).password(password.as_str());
        }
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }

        let neo_config = builder
            .build()
            .map_err(|e| BoltSupportError::connection(&config.uri, e))?;
        neo4rs::Graph::connect(neo_config)
            .await
            .map_err(|e| BoltSupportError::connection(&config.uri, e))
    }
}
