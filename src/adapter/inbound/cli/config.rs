//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
pub(crate) const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit the [limits] table in {}", path.display()));
    output::note(&format!(
        "2. Run: capguard config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: capguard limits -c {}", path.display()));
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let limits = config.parsed_limits()?;
    let banned = limits.iter().filter(|(_, cap)| *cap == 0).count();

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "limits": limits.len(),
            "banned": banned,
            "remediation": config.enforcement.remediation.to_string(),
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    output::field("Limits", limits.len());
    output::field("Banned", banned);
    output::field(
        "Login delay",
        format!("{} ticks", config.enforcement.login_delay_ticks),
    );
    output::field("Remediation", config.enforcement.remediation);

    if limits.is_empty() {
        output::warning("No limits configured; every item is unlimited");
    }

    output::field("Next", format!("capguard limits -c {}", path.display()));
    Ok(())
}
