//! Integration tests for Settings config loading.
//!
//! These tests only use a local config file in a temp directory, so they
//! exercise the local layer on top of compiled defaults.

use std::fs;

use tempfile::TempDir;

use spacecost::application::ApplicationError;
use spacecost::config::Settings;
use spacecost::domain::Horizon;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spacecost.toml");
    fs::write(
        &path,
        r#"
horizon_months = 60
currency = "GBP"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.horizon().unwrap(), Horizon::FiveYears);
    assert_eq!(settings.currency_symbol(), "£");
}

#[test]
fn given_local_config_with_bad_horizon_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spacecost.toml");
    fs::write(&path, "horizon_months = 18\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_toml_when_load_then_config_error_mentions_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "horizon_months = [\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_when_parsed_then_yields_defaults() {
    let settings: Settings = toml::from_str(&Settings::template()).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_unknown_currency_when_mapping_symbol_then_code_passes_through() {
    let settings = Settings {
        currency: "JPY".into(),
        ..Default::default()
    };

    assert_eq!(settings.currency_symbol(), "JPY");
}

#[test]
fn given_nan_growth_rate_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spacecost.toml");
    fs::write(&path, "growth_rate = nan\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("growth_rate"), "{err}");
}
