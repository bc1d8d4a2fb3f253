//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LimitError;

/// Identity of a stackable good kind (for example `DIAMOND_SWORD`).
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. Identifiers are normalized to upper case so
/// `ender_pearl` and `ENDER_PEARL` name the same good.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoodType(String);

impl GoodType {
    /// Create a new `GoodType`, rejecting empty or whitespace-bearing names.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, LimitError> {
        let raw = id.as_ref().trim();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(LimitError::InvalidGoodType {
                value: id.as_ref().to_string(),
            });
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name used in actor notices.
    ///
    /// `DIAMOND_SWORD` renders as `Diamond Sword`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let lower = part.to_ascii_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for GoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for GoodType {
    type Error = LimitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for GoodType {
    type Error = LimitError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<GoodType> for String {
    fn from(good: GoodType) -> Self {
        good.0
    }
}

/// Actor (player) identifier - newtype over a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(uuid::Uuid);

impl ActorId {
    /// Create a new `ActorId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Wrap an existing UUID supplied by the host.
    #[must_use]
    pub const fn from_uuid(id: uuid::Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for ActorId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_type_normalizes_case() {
        let good = GoodType::parse("ender_pearl").unwrap();
        assert_eq!(good.as_str(), "ENDER_PEARL");
        assert_eq!(good, GoodType::parse("ENDER_PEARL").unwrap());
    }

    #[test]
    fn good_type_rejects_blank_and_spaced_names() {
        assert!(GoodType::parse("").is_err());
        assert!(GoodType::parse("   ").is_err());
        assert!(GoodType::parse("ENDER PEARL").is_err());
    }

    #[test]
    fn display_name_title_cases_words() {
        let good = GoodType::parse("DIAMOND_SWORD").unwrap();
        assert_eq!(good.display_name(), "Diamond Sword");

        let single = GoodType::parse("tnt").unwrap();
        assert_eq!(single.display_name(), "Tnt");
    }

    #[test]
    fn display_name_skips_empty_segments() {
        let good = GoodType::parse("TOTEM__OF_UNDYING").unwrap();
        assert_eq!(good.display_name(), "Totem Of Undying");
    }

    #[test]
    fn good_type_deserializes_through_validation() {
        let good: GoodType = serde_json::from_str("\"golden_apple\"").unwrap();
        assert_eq!(good.as_str(), "GOLDEN_APPLE");

        let bad: Result<GoodType, _> = serde_json::from_str("\"golden apple\"");
        assert!(bad.is_err());
    }

    #[test]
    fn actor_ids_are_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }
}
