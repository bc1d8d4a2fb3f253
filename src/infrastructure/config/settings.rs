//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section except
//! `[logging]` falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use capguard::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     let registry = config.registry()?;
//!     assert_eq!(registry.len(), config.limits.len());
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::enforcement::{EnforcementConfig, REFRESH_COOLDOWN_RANGE_MS};
use super::logging::{LoggingConfig, FORMATS};
use crate::application::{EnforcerSettings, LimitRegistry, MessageTemplates};
use crate::domain::GoodType;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// Per-good capacities. Absent goods are unlimited; zero bans a good.
    ///
    /// Keys are normalized the way `GoodType::parse` does.
    #[serde(default)]
    pub limits: BTreeMap<String, u32>,

    /// Delays, remediation mode and refresh throttling.
    #[serde(default)]
    pub enforcement: EnforcementConfig,

    /// Actor-facing notice templates.
    #[serde(default)]
    pub messages: MessageTemplates,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a blank good name or a zero delay)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if !self.logging.has_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", FORMATS.join(", ")),
            }
            .into());
        }

        self.parsed_limits()?;

        let enforcement = &self.enforcement;
        if enforcement.login_delay_ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "enforcement.login_delay_ticks",
                reason: "must be at least 1 tick".to_string(),
            }
            .into());
        }
        if enforcement.transfer_delay_ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "enforcement.transfer_delay_ticks",
                reason: "must be at least 1 tick".to_string(),
            }
            .into());
        }
        if !REFRESH_COOLDOWN_RANGE_MS.contains(&enforcement.refresh_cooldown_ms) {
            return Err(ConfigError::InvalidValue {
                field: "enforcement.refresh_cooldown_ms",
                reason: format!(
                    "must be between {} and {}",
                    REFRESH_COOLDOWN_RANGE_MS.start(),
                    REFRESH_COOLDOWN_RANGE_MS.end()
                ),
            }
            .into());
        }
        if enforcement.cooldown_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "enforcement.cooldown_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        for (field, template) in self.messages.entries() {
            if template.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Configured caps keyed by normalized good type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a key that is not a valid
    /// good type, or when two keys normalize to the same good.
    #[allow(clippy::result_large_err)]
    pub fn parsed_limits(&self) -> Result<Vec<(GoodType, u32)>> {
        let mut parsed: BTreeMap<GoodType, u32> = BTreeMap::new();
        for (key, &capacity) in &self.limits {
            let good = GoodType::parse(key).map_err(|e| ConfigError::InvalidValue {
                field: "limits",
                reason: e.to_string(),
            })?;
            if parsed.insert(good.clone(), capacity).is_some() {
                return Err(ConfigError::InvalidValue {
                    field: "limits",
                    reason: format!("'{good}' is configured more than once"),
                }
                .into());
            }
        }
        Ok(parsed.into_iter().collect())
    }

    /// Build a registry seeded with the configured caps.
    ///
    /// # Errors
    ///
    /// See [`Config::parsed_limits`].
    #[allow(clippy::result_large_err)]
    pub fn registry(&self) -> Result<LimitRegistry> {
        Ok(LimitRegistry::with_limits(self.parsed_limits()?))
    }

    /// Engine tunables derived from `[enforcement]` and `[messages]`.
    #[must_use]
    pub fn enforcer_settings(&self) -> EnforcerSettings {
        EnforcerSettings {
            login_delay: self.enforcement.login_delay_ticks,
            transfer_delay: self.enforcement.transfer_delay_ticks,
            remediation: self.enforcement.remediation,
            refresh_cooldown: Duration::from_millis(self.enforcement.refresh_cooldown_ms),
            cooldown_capacity: self.enforcement.cooldown_capacity,
            templates: self.messages.clone(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RemediationMode;

    const MINIMAL: &str = r#"
[logging]
level = "info"
format = "pretty"
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse_toml(MINIMAL).unwrap();
        assert!(config.limits.is_empty());
        assert_eq!(config.enforcement, EnforcementConfig::default());
        assert_eq!(config.messages, MessageTemplates::default());
    }

    #[test]
    fn limit_keys_are_normalized() {
        let toml = format!("{MINIMAL}\n[limits]\nender_pearl = 16\n");
        let config = Config::parse_toml(&toml).unwrap();
        let limits = config.parsed_limits().unwrap();
        assert_eq!(limits, vec![(GoodType::parse("ENDER_PEARL").unwrap(), 16)]);
    }

    #[test]
    fn keys_colliding_after_normalization_are_rejected() {
        let toml = format!("{MINIMAL}\n[limits]\nender_pearl = 16\nENDER_PEARL = 8\n");
        let err = Config::parse_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn enforcer_settings_follow_config() {
        let toml = format!(
            "{MINIMAL}\n[enforcement]\nlogin_delay_ticks = 40\nremediation = \"discard\"\nrefresh_cooldown_ms = 500\n"
        );
        let settings = Config::parse_toml(&toml).unwrap().enforcer_settings();
        assert_eq!(settings.login_delay, 40);
        assert_eq!(settings.transfer_delay, 1);
        assert_eq!(settings.remediation, RemediationMode::Discard);
        assert_eq!(settings.refresh_cooldown, Duration::from_millis(500));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = Config::parse_toml("[logging]\nlevel = \"info\"\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
