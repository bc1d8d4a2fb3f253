//! Arbitration outcomes and the instructions handed back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an addition was refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The good has a capacity of zero.
    Banned,
    /// The actor already holds the full capacity.
    Saturated,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Banned => f.write_str("banned"),
            Self::Saturated => f.write_str("saturated"),
        }
    }
}

/// Result of arbitrating one pending mutation against its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The mutation proceeds unmodified.
    Allow,
    /// The mutation is refused entirely.
    Reject { reason: RejectReason, limit: u32 },
    /// Only `accepted` units fit; `remainder` must go elsewhere.
    Partial {
        accepted: u32,
        remainder: u32,
        limit: u32,
    },
}

impl Verdict {
    /// Check if the mutation may proceed unmodified.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// What the host must do with the event that triggered arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Let the event proceed unmodified.
    Proceed,
    /// Cancel the event; nothing moves.
    Cancel,
    /// Apply only `accepted` units; `remainder` stays at the source
    /// (ground stack, cursor).
    Trim { accepted: u32, remainder: u32 },
}

impl fmt::Display for Interception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => f.write_str("proceed"),
            Self::Cancel => f.write_str("cancel"),
            Self::Trim {
                accepted,
                remainder,
            } => write!(f, "trim {accepted}/{remainder}"),
        }
    }
}

/// Where reconciled excess goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationMode {
    /// Drop the excess on the ground at the actor's position.
    #[default]
    Drop,
    /// Delete the excess.
    Discard,
}

impl fmt::Display for RemediationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Discard => f.write_str("discard"),
        }
    }
}
