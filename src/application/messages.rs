//! Actor-facing message templates.
//!
//! Templates use `{item}`, `{limit}`, `{amount}` and `{count}`
//! placeholders. Color codes, if any, are left for the host to translate.

use serde::{Deserialize, Serialize};

use crate::domain::GoodType;
use crate::port::outbound::notifier::{Notice, NoticeKind};

/// Message templates for every notice the engine emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    /// Pickup from the ground refused.
    pub pickup_blocked: String,
    /// Placement or transfer into holdings refused.
    pub place_blocked: String,
    /// Only part of an incoming stack accepted.
    pub partial_accepted: String,
    /// Cursor stack dropped on close or drop.
    pub cursor_diverted: String,
    /// Summary after a reconciliation sweep.
    pub login_removed: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            pickup_blocked: "You cannot pick up {item} (limit: {limit})".into(),
            place_blocked: "You already have the maximum {item} ({limit})!".into(),
            partial_accepted: "Only {amount} {item} fit under your limit of {limit}".into(),
            cursor_diverted: "Dropped {amount} {item}: you may only carry {limit}".into(),
            login_removed: "Removed {count} limited items from your inventory!".into(),
        }
    }
}

impl MessageTemplates {
    /// Iterate `(field name, template)` pairs, for validation.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("messages.pickup_blocked", self.pickup_blocked.as_str()),
            ("messages.place_blocked", self.place_blocked.as_str()),
            ("messages.partial_accepted", self.partial_accepted.as_str()),
            ("messages.cursor_diverted", self.cursor_diverted.as_str()),
            ("messages.login_removed", self.login_removed.as_str()),
        ]
    }

    /// Notice for a refused pickup or placement.
    #[must_use]
    pub fn blocked(&self, kind: NoticeKind, good: &GoodType, limit: u32) -> Notice {
        let template = match kind {
            NoticeKind::PickupBlocked => &self.pickup_blocked,
            _ => &self.place_blocked,
        };
        Notice {
            kind,
            text: render(template, &good.display_name(), limit, 0, 0),
        }
    }

    /// Notice for a partial fill.
    #[must_use]
    pub fn partial(&self, good: &GoodType, limit: u32, accepted: u32) -> Notice {
        Notice {
            kind: NoticeKind::PartialAccepted,
            text: render(&self.partial_accepted, &good.display_name(), limit, accepted, 0),
        }
    }

    /// Notice for a cursor stack sent to the ground.
    #[must_use]
    pub fn diverted(&self, good: &GoodType, limit: u32, amount: u32) -> Notice {
        Notice {
            kind: NoticeKind::CursorDiverted,
            text: render(&self.cursor_diverted, &good.display_name(), limit, amount, 0),
        }
    }

    /// Summary notice after a sweep.
    #[must_use]
    pub fn removed(&self, count: u32) -> Notice {
        Notice {
            kind: NoticeKind::ItemsRemoved,
            text: render(&self.login_removed, "", 0, 0, count),
        }
    }
}

fn render(template: &str, item: &str, limit: u32, amount: u32, count: u32) -> String {
    template
        .replace("{item}", item)
        .replace("{limit}", &limit.to_string())
        .replace("{amount}", &amount.to_string())
        .replace("{count}", &count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good(name: &str) -> GoodType {
        GoodType::parse(name).unwrap()
    }

    #[test]
    fn blocked_pickup_names_item_and_limit() {
        let templates = MessageTemplates::default();
        let notice = templates.blocked(NoticeKind::PickupBlocked, &good("ENDER_PEARL"), 16);
        assert_eq!(notice.kind, NoticeKind::PickupBlocked);
        assert_eq!(notice.text, "You cannot pick up Ender Pearl (limit: 16)");
    }

    #[test]
    fn partial_includes_accepted_amount() {
        let notice = MessageTemplates::default().partial(&good("STONE"), 10, 3);
        assert_eq!(notice.text, "Only 3 Stone fit under your limit of 10");
    }

    #[test]
    fn removed_uses_count() {
        let notice = MessageTemplates::default().removed(3);
        assert_eq!(notice.kind, NoticeKind::ItemsRemoved);
        assert_eq!(notice.text, "Removed 3 limited items from your inventory!");
    }

    #[test]
    fn custom_templates_keep_unknown_text() {
        let templates = MessageTemplates {
            place_blocked: "&cMax {item}: {limit} {unknown}".into(),
            ..Default::default()
        };
        let notice = templates.blocked(NoticeKind::PlaceBlocked, &good("TNT"), 0);
        assert_eq!(notice.text, "&cMax Tnt: 0 {unknown}");
    }
}
