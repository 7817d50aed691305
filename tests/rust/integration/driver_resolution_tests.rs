//! Integration tests for driver resolution through the build's default
//! factory. Without the `bolt` feature every request for a driver must fail
//! with the remediation message.

use bolt_tables::bolt::{resolve_default_driver, BoltSupportError, DriverSpec};
use bolt_tables::config::DriverConfig;

#[tokio::test]
async fn test_no_driver_requested() {
    let result = resolve_default_driver(None).await;
    assert!(matches!(result, Ok(None)));
}

#[cfg(not(feature = "bolt"))]
#[tokio::test]
async fn test_config_without_client_library() {
    let config = DriverConfig {
        uri: "bolt://x".to_string(),
        auth: Some(("u".to_string(), "p".to_string())),
        ..Default::default()
    };

    let err = resolve_default_driver(Some(DriverSpec::Config(config)))
        .await
        .unwrap_err();
    assert!(matches!(err, BoltSupportError::ClientLibraryMissing));
    let message = err.to_string();
    assert!(!message.is_empty());
    assert!(message.contains("--features bolt"));
}

#[cfg(feature = "bolt")]
#[tokio::test]
async fn test_invalid_config_rejected_before_connecting() {
    let config = DriverConfig {
        uri: "http://x".to_string(),
        ..Default::default()
    };

    let result = resolve_default_driver(Some(DriverSpec::Config(config))).await;
    assert!(matches!(result, Err(BoltSupportError::InvalidConfig(_))));
}
