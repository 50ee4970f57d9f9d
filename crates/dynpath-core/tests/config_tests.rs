use dynpath_core::config::{CliOverrides, ProjectConfig, RewriteConfig};
use dynpath_core::{ConfigError, PathRewriter, SchemaViolation};
use indoc::indoc;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Rewriter options
// ============================================================================

#[test]
fn test_all_violations_reported_together() {
    let err = PathRewriter::new(&json!({ "initializer": 7, "extra": true })).err().unwrap();

    let violations = err.violations();
    assert_eq!(violations.len(), 3);
    assert!(violations.contains(&SchemaViolation::MissingField { field: "entryName" }));
    assert!(violations.contains(&SchemaViolation::UnknownField {
        field: "extra".to_string()
    }));

    let message = err.to_string();
    assert!(message.contains("initializer"));
    assert!(message.contains("entryName"));
    assert!(message.contains("extra"));
}

#[test]
fn test_options_not_an_object() {
    let err = RewriteConfig::from_value(&json!("setPath")).unwrap_err();
    assert!(matches!(
        err.violations(),
        [SchemaViolation::NotAnObject { .. }]
    ));
}

#[test]
fn test_rewrite_options_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rewrite.json");
    fs::write(&path, r#"{ "initializer": "setPath", "entryName": "checkout" }"#).unwrap();

    let config = RewriteConfig::from_file(&path).unwrap();
    assert_eq!(config.initializer(), "setPath");
    assert_eq!(config.entry_name(), "checkout");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rewrite.toml");
    fs::write(&path, "initializer = 'setPath'").unwrap();

    assert!(matches!(
        RewriteConfig::from_file(&path),
        Err(ConfigError::UnsupportedFormat { .. })
    ));
}

// ============================================================================
// Project configuration
// ============================================================================

#[test]
fn test_project_config_from_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dynpath.yaml");
    fs::write(
        &path,
        indoc! {"
            rewrite:
              initializer: setPath
              entryName: checkout
            outDir: build/runtime
            pretty: false
        "},
    )
    .unwrap();

    let config = ProjectConfig::from_file(&path).unwrap();
    let rewrite = config.rewrite_config().unwrap();
    assert_eq!(rewrite.initializer(), "setPath");
    assert_eq!(rewrite.entry_name(), "checkout");
    assert_eq!(config.out_dir.as_deref(), Some("build/runtime"));
    assert!(!config.pretty);
}

#[test]
fn test_project_config_invalid_rewrite_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dynpath.yaml");
    fs::write(
        &path,
        indoc! {"
            rewrite:
              initializer: setPath
        "},
    )
    .unwrap();

    let err = ProjectConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("entryName"));
}

#[test]
fn test_sample_round_trips_through_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dynpath.yaml");

    ProjectConfig::sample().write_yaml(&path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("entryName: app"));

    let config = ProjectConfig::from_file(&path).unwrap();
    assert_eq!(config.rewrite, ProjectConfig::sample().rewrite);
    assert_eq!(config.out_dir.as_deref(), Some("dist"));
}

#[test]
fn test_cli_overrides_complete_partial_project() {
    let mut config = ProjectConfig::default();
    config
        .merge(&CliOverrides {
            initializer: Some("setPath".to_string()),
            entry_name: Some("checkout".to_string()),
            ..CliOverrides::default()
        })
        .unwrap();

    assert_eq!(
        config.rewrite_config().unwrap(),
        &RewriteConfig::new("setPath", "checkout")
    );
}

#[test]
fn test_cli_override_alone_is_incomplete() {
    let mut config = ProjectConfig::default();
    let err = config
        .merge(&CliOverrides {
            initializer: Some("setPath".to_string()),
            ..CliOverrides::default()
        })
        .unwrap_err();

    assert_eq!(
        err.violations(),
        &[SchemaViolation::MissingField { field: "entryName" }]
    );
}
