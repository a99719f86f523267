//! Tests for configuration validation

use std::collections::HashMap;
use std::time::Duration;

use prometheus_dispatch::config::{DispatchConfig, QueueBackendConfig};

#[test]
fn test_defaults_two_vehicle_fleet() {
    let config = DispatchConfig::default();
    assert_eq!(config.vehicles, ["Vehicle-1", "Vehicle-2"]);
    assert_eq!(config.service_duration(), Duration::from_secs(10));
    assert_eq!(config.queue, QueueBackendConfig::Linear);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_empty_vehicles() {
    let config = DispatchConfig {
        vehicles: Vec::new(),
        ..DispatchConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_duplicate_vehicles() {
    let config = DispatchConfig {
        vehicles: vec!["V1".into(), "V2".into(), "V1".into()],
        ..DispatchConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.contains("V1"));
}

#[test]
fn test_invalid_blank_vehicle() {
    let config = DispatchConfig {
        vehicles: vec!["V1".into(), "  ".into()],
        ..DispatchConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_service_duration() {
    let config = DispatchConfig {
        service_duration_ms: 0,
        ..DispatchConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_from_json() {
    let json = r#"{
        "vehicles": ["Truck-A", "Truck-B", "Truck-C"],
        "service_duration_ms": 2500,
        "queue": "ordered"
    }"#;

    let config = DispatchConfig::from_json_str(json).unwrap();
    assert_eq!(config.vehicles.len(), 3);
    assert_eq!(config.service_duration(), Duration::from_millis(2500));
    assert_eq!(config.queue, QueueBackendConfig::Ordered);
    assert_eq!(config.event_buffer, 1024);
}

#[test]
fn test_from_json_defaults_and_rejects_invalid() {
    assert_eq!(DispatchConfig::from_json_str("{}").unwrap(), DispatchConfig::default());
    assert!(DispatchConfig::from_json_str(r#"{"vehicles": []}"#).is_err());
    assert!(DispatchConfig::from_json_str("not json").is_err());
}

#[test]
fn test_from_lookup() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DISPATCH_VEHICLES", "Van-1, Van-2 ,,Van-3"),
        ("DISPATCH_SERVICE_MS", "750"),
        ("DISPATCH_QUEUE", "Ordered"),
    ]);
    let config = DispatchConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_string())).unwrap();

    assert_eq!(config.vehicles, ["Van-1", "Van-2", "Van-3"]);
    assert_eq!(config.service_duration_ms, 750);
    assert_eq!(config.queue, QueueBackendConfig::Ordered);
}

#[test]
fn test_from_lookup_rejects_bad_values() {
    let bad_ms = DispatchConfig::from_lookup(|k| (k == "DISPATCH_SERVICE_MS").then(|| "soon".into()));
    assert!(bad_ms.is_err());

    let bad_queue = DispatchConfig::from_lookup(|k| (k == "DISPATCH_QUEUE").then(|| "heap".into()));
    assert!(bad_queue.is_err());

    let zero = DispatchConfig::from_lookup(|k| (k == "DISPATCH_SERVICE_MS").then(|| "0".into()));
    assert!(zero.is_err());
}

#[test]
fn test_from_env_without_dotenv_file() {
    let config = DispatchConfig::from_env().unwrap();
    // A missing `.env` is not an error; whatever the process environment
    // holds is read through the same keys as `from_lookup`.
    let expected = DispatchConfig::from_lookup(|k| std::env::var(k).ok()).unwrap();
    assert_eq!(config, expected);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_env_defaults_when_unset() {
    let keys = [
        "DISPATCH_VEHICLES",
        "DISPATCH_SERVICE_MS",
        "DISPATCH_QUEUE",
        "DISPATCH_EVENT_BUFFER",
    ];
    if keys.iter().any(|k| std::env::var(k).is_ok()) {
        return;
    }
    assert_eq!(DispatchConfig::from_env().unwrap(), DispatchConfig::default());
}
