use std::collections::HashMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::rstest;
use slotwise_cli::config::{AppConfig, DEFAULT_STORE_DIR};
use tracing::Level;

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.default_timezone, chrono_tz::UTC);
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_log_level(#[case] raw: &str, #[case] expected: Level) {
    let config = config_from(&[("LOG_LEVEL", raw)]).unwrap();
    assert_eq!(config.log_level, expected);
}

#[test]
fn test_timezone_prefers_slotwise_variable() {
    let config = config_from(&[
        ("SLOTWISE_TIMEZONE", "Asia/Tokyo"),
        ("TZ", "Europe/Berlin"),
    ])
    .unwrap();
    assert_eq!(config.default_timezone, chrono_tz::Asia::Tokyo);

    let config = config_from(&[("TZ", "Europe/Berlin")]).unwrap();
    assert_eq!(config.default_timezone, chrono_tz::Europe::Berlin);
}

#[test]
fn test_unknown_timezone_is_an_error() {
    let err = config_from(&[("SLOTWISE_TIMEZONE", "Mars/Olympus")]).unwrap_err();
    assert!(err.to_string().contains("SLOTWISE_TIMEZONE"));
}

#[test]
fn test_store_dir_override() {
    let config = config_from(&[("SLOTWISE_STORE_DIR", "/var/lib/slotwise")]).unwrap();
    assert_eq!(config.store_dir, PathBuf::from("/var/lib/slotwise"));

    let config = config.with_store_dir(Some(PathBuf::from("/tmp/other")));
    assert_eq!(config.store_dir, PathBuf::from("/tmp/other"));

    let config = config.with_store_dir(None);
    assert_eq!(config.store_dir, PathBuf::from("/tmp/other"));
}
