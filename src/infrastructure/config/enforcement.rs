//! Enforcement tunables.

use serde::Deserialize;

use crate::domain::{RemediationMode, Ticks};

/// Accepted range for the per-actor refresh cooldown, in milliseconds.
pub const REFRESH_COOLDOWN_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=1000;

/// `[enforcement]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Ticks between session start and the reconciliation sweep.
    pub login_delay_ticks: Ticks,
    /// Ticks before deferred transfers and cursor diverts run.
    pub transfer_delay_ticks: Ticks,
    /// What happens to units stripped by reconciliation.
    pub remediation: RemediationMode,
    /// Minimum spacing between view refreshes for one actor.
    pub refresh_cooldown_ms: u64,
    /// Maximum actors tracked by the refresh cooldown.
    pub cooldown_capacity: usize,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            login_delay_ticks: 20,
            transfer_delay_ticks: 1,
            remediation: RemediationMode::Drop,
            refresh_cooldown_ms: 150,
            cooldown_capacity: 4096,
        }
    }
}
