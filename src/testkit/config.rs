//! Canonical test configurations.
//!
//! Single source of truth for TOML documents used across tests.

/// Smallest valid document: only `[logging]`.
pub const MINIMAL: &str = r#"
[logging]
level = "warn"
format = "pretty"
"#;

/// A minimal document plus a `[limits]` table.
pub fn with_limits(limits: &[(&str, u32)]) -> String {
    let mut toml = String::from(MINIMAL);
    toml.push_str("\n[limits]\n");
    for (good, limit) in limits {
        toml.push_str(&format!("{good} = {limit}\n"));
    }
    toml
}

/// A document touching every section.
pub fn full() -> String {
    let mut toml = with_limits(&[("ENDER_PEARL", 16), ("TOTEM_OF_UNDYING", 1), ("TNT", 0)]);
    toml.push_str(
        r#"
[enforcement]
login_delay_ticks = 20
transfer_delay_ticks = 1
remediation = "discard"
refresh_cooldown_ms = 250
cooldown_capacity = 128

[messages]
login_removed = "Confiscated {count} items"
"#,
    );
    toml
}
