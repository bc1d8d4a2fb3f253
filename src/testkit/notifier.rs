//! Notice capture.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::ActorId;
use crate::port::outbound::notifier::{ActorNotifier, Notice, NoticeKind};

/// Thread-safe notice collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(ActorId, Notice)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice so far, oldest first.
    pub fn notices(&self) -> Vec<(ActorId, Notice)> {
        self.notices.lock().clone()
    }

    /// Notices delivered to one actor.
    pub fn for_actor(&self, actor: &ActorId) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|(recipient, _)| recipient == actor)
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    /// Number of notices of `kind`.
    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices
            .lock()
            .iter()
            .filter(|(_, notice)| notice.kind == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl ActorNotifier for RecordingNotifier {
    fn notify(&self, actor: &ActorId, notice: Notice) {
        self.notices.lock().push((*actor, notice));
    }
}
