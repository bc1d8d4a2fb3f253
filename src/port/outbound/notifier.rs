//! Notifier port for actor-facing notices.
//!
//! Every rejection, partial fill, cursor diversion and reconciliation
//! produces exactly one [`Notice`] for the affected actor.

use tracing::info;

use crate::domain::ActorId;

/// Kind of policy outcome a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A pickup from the ground was refused.
    PickupBlocked,
    /// A placement or transfer into holdings was refused.
    PlaceBlocked,
    /// Only part of the incoming quantity was accepted.
    PartialAccepted,
    /// The cursor stack was dropped instead of being kept.
    CursorDiverted,
    /// Excess units were removed by a sweep.
    ItemsRemoved,
}

impl NoticeKind {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PickupBlocked => "pickup_blocked",
            Self::PlaceBlocked => "place_blocked",
            Self::PartialAccepted => "partial_accepted",
            Self::CursorDiverted => "cursor_diverted",
            Self::ItemsRemoved => "items_removed",
        }
    }
}

/// A rendered notice for one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Message text with placeholders already substituted.
    pub text: String,
}

/// Trait for delivering notices to actors.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method runs on the tick thread and must not block
pub trait ActorNotifier: Send + Sync {
    /// Deliver a notice to an actor.
    fn notify(&self, actor: &ActorId, notice: Notice);
}

/// Fans one notice out to every registered notifier.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn ActorNotifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn ActorNotifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorNotifier for NotifierRegistry {
    fn notify(&self, actor: &ActorId, notice: Notice) {
        for notifier in &self.notifiers {
            notifier.notify(actor, notice.clone());
        }
    }
}

/// A no-op notifier for hosts that surface nothing to actors.
pub struct NullNotifier;

impl ActorNotifier for NullNotifier {
    fn notify(&self, _actor: &ActorId, _notice: Notice) {}
}

/// A logging notifier that records notices via tracing.
pub struct LogNotifier;

impl ActorNotifier for LogNotifier {
    fn notify(&self, actor: &ActorId, notice: Notice) {
        info!(
            actor = %actor,
            kind = notice.kind.as_str(),
            text = %notice.text,
            "Actor notice"
        );
    }
}
