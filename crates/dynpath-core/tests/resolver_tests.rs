use dynpath_core::resolver::{RuntimeConfig, ENVIRONMENT_GLOBAL, MAP_GLOBAL};
use dynpath_core::ResolveError;
use dynpath_test_helpers::fixtures;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_resolve_from_host_globals() {
    let config = RuntimeConfig::from_globals(&fixtures::host_globals("staging")).unwrap();

    assert_eq!(
        config.resolve("checkout").unwrap(),
        "https://staging.example.com/checkout/"
    );
    assert_eq!(
        config.resolve("app1").unwrap(),
        "https://staging.example.com/app1/"
    );
}

#[test]
fn test_environment_switch_changes_every_entry() {
    let prod = RuntimeConfig::from_globals(&fixtures::host_globals("prod")).unwrap();

    for entry in prod.map.entries() {
        assert!(prod.resolve(entry).unwrap().starts_with("https://cdn.example.com/"));
    }
}

#[test]
fn test_unknown_environment_is_an_error() {
    let config = RuntimeConfig::from_globals(&fixtures::host_globals("dev")).unwrap();

    assert_eq!(
        config.resolve("app1"),
        Err(ResolveError::UnknownEnvironment {
            entry: "app1".to_string(),
            environment: "dev".to_string(),
        })
    );
}

#[test]
fn test_missing_map_global() {
    let globals = json!({ ENVIRONMENT_GLOBAL: "prod" });

    assert_eq!(
        RuntimeConfig::from_globals(&globals),
        Err(ResolveError::MissingGlobal { name: MAP_GLOBAL })
    );
}

#[test]
fn test_map_global_wrong_shape() {
    let globals = json!({ MAP_GLOBAL: ["app1"], ENVIRONMENT_GLOBAL: "prod" });

    assert!(matches!(
        RuntimeConfig::from_globals(&globals),
        Err(ResolveError::InvalidGlobal { name: "__MAP__", .. })
    ));
}

#[test]
fn test_map_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("map.json");
    let globals = fixtures::host_globals("prod");
    fs::write(&path, serde_json::to_string(&globals[MAP_GLOBAL]).unwrap()).unwrap();

    let config = RuntimeConfig::from_map_file(&path, "prod").unwrap();
    assert_eq!(
        config.resolve("checkout").unwrap(),
        "https://cdn.example.com/checkout/"
    );
}

#[test]
fn test_error_messages_name_entry_and_environment() {
    let config = RuntimeConfig::from_globals(&fixtures::host_globals("qa")).unwrap();
    let message = config.resolve("checkout").unwrap_err().to_string();

    assert!(message.contains("checkout"));
    assert!(message.contains("qa"));
}
