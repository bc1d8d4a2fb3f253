mod harness;

use std::time::Duration;

use capguard::domain::RemediationMode;
use capguard::error::{ConfigError, Error};
use capguard::infrastructure::config::Config;
use capguard::port::LimitQuery;
use capguard::testkit::config::{full, with_limits, MINIMAL};
use capguard::testkit::domain::good;
use harness::temp_config::TempConfig;

#[test]
fn loads_full_document_from_disk() {
    let file = TempConfig::create(&full());
    let config = Config::load(file.path()).expect("load");

    let registry = config.registry().expect("registry");
    assert_eq!(registry.limit_of(&good("ENDER_PEARL")), Some(16));
    assert_eq!(registry.limit_of(&good("TNT")), Some(0));
    assert_eq!(registry.len(), 3);

    let settings = config.enforcer_settings();
    assert_eq!(settings.remediation, RemediationMode::Discard);
    assert_eq!(settings.refresh_cooldown, Duration::from_millis(250));
    assert_eq!(settings.cooldown_capacity, 128);
    assert_eq!(settings.templates.login_removed, "Confiscated {count} items");
}

#[test]
fn minimal_document_uses_defaults() {
    let config = Config::parse_toml(MINIMAL).expect("parse");
    let settings = config.enforcer_settings();

    assert!(config.registry().expect("registry").is_empty());
    assert_eq!(settings.login_delay, 20);
    assert_eq!(settings.transfer_delay, 1);
    assert_eq!(settings.remediation, RemediationMode::Drop);
    assert_eq!(settings.refresh_cooldown, Duration::from_millis(150));
}

#[test]
fn limit_keys_are_case_insensitive() {
    let config = Config::parse_toml(&with_limits(&[("ender_pearl", 4)])).expect("parse");
    let registry = config.registry().expect("registry");
    assert_eq!(registry.limit_of(&good("ENDER_PEARL")), Some(4));
}

#[test]
fn duplicate_keys_after_normalization_are_rejected() {
    let toml = with_limits(&[("ender_pearl", 4), ("ENDER_PEARL", 8)]);
    let result = Config::parse_toml(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "limits", .. }))
    ));
}

#[test]
fn missing_logging_section_fails_to_parse() {
    let result = Config::parse_toml("[limits]\nTNT = 0\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn negative_limit_fails_to_parse() {
    let result = Config::parse_toml(&with_limits(&[]).replace("[limits]\n", "[limits]\nTNT = -1\n"));
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn zero_login_delay_is_rejected() {
    let toml = format!("{MINIMAL}\n[enforcement]\nlogin_delay_ticks = 0\n");
    let result = Config::parse_toml(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "enforcement.login_delay_ticks",
            ..
        }))
    ));
}

#[test]
fn refresh_cooldown_outside_range_is_rejected() {
    for value in [50, 5000] {
        let toml = format!("{MINIMAL}\n[enforcement]\nrefresh_cooldown_ms = {value}\n");
        let result = Config::parse_toml(&toml);
        assert!(
            matches!(
                result,
                Err(Error::Config(ConfigError::InvalidValue {
                    field: "enforcement.refresh_cooldown_ms",
                    ..
                }))
            ),
            "{value} accepted"
        );
    }
}

#[test]
fn unknown_log_format_is_rejected() {
    let toml = MINIMAL.replace("pretty", "fancy");
    let result = Config::parse_toml(&toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "logging.format",
            ..
        }))
    ));
}

#[test]
fn missing_file_reports_read_error() {
    let file = TempConfig::create(MINIMAL);
    let result = Config::load(file.dir().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
