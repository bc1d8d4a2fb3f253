//! An engine wired to the in-memory host.
//!
//! Mirrors what a real host does each tick: run host actions, advance the
//! scheduler, hand due jobs back to the engine.

use std::sync::Arc;

use super::domain::good;
use super::notifier::RecordingNotifier;
use crate::adapter::outbound::memory::MemoryHost;
use crate::adapter::outbound::scheduler::TickScheduler;
use crate::application::{Enforcer, EnforcerSettings, LimitRegistry};
use crate::domain::{ActorId, DeferredJob};
use crate::port::inbound::limits::LimitQuery;

/// Engine, host, scheduler and notice recorder in one place.
pub struct Harness {
    pub host: MemoryHost,
    pub scheduler: Arc<TickScheduler>,
    pub notifier: RecordingNotifier,
    pub enforcer: Enforcer,
}

impl Harness {
    /// Harness with default settings and the given caps.
    pub fn new(limits: &[(&str, u32)]) -> Self {
        Self::with_settings(limits, EnforcerSettings::default())
    }

    /// Harness with explicit settings.
    pub fn with_settings(limits: &[(&str, u32)], settings: EnforcerSettings) -> Self {
        let registry = Arc::new(LimitRegistry::with_limits(
            limits.iter().map(|(name, limit)| (good(name), *limit)),
        ));
        let scheduler = Arc::new(TickScheduler::new());
        let notifier = RecordingNotifier::new();
        let enforcer = Enforcer::new(
            registry,
            Arc::new(notifier.clone()),
            scheduler.clone(),
            settings,
        );
        Self {
            host: MemoryHost::new(),
            scheduler,
            notifier,
            enforcer,
        }
    }

    /// Connect an actor without starting a session (no reconciliation).
    pub fn join_quietly(&mut self) -> ActorId {
        self.host.join()
    }

    /// Connect an actor and start their session.
    pub fn join(&mut self) -> ActorId {
        let actor = self.host.join();
        self.enforcer.on_session_start(&actor);
        actor
    }

    /// Reconnect a known actor and start a new session.
    pub fn rejoin(&mut self, actor: &ActorId) {
        self.host.rejoin(actor);
        self.enforcer.on_session_start(actor);
    }

    /// Disconnect an actor.
    pub fn leave(&mut self, actor: &ActorId) {
        self.host.leave(actor);
        self.enforcer.on_session_end(actor);
    }

    /// Advance `ticks` ticks, running due jobs. Returns the jobs that ran.
    pub fn tick(&mut self, ticks: u32) -> Vec<DeferredJob> {
        let mut ran = Vec::new();
        for _ in 0..ticks {
            for job in self.scheduler.advance() {
                self.enforcer.run_job(&mut self.host, &job);
                ran.push(job);
            }
        }
        ran
    }

    /// Units of `name` the actor holds at rest (cursor excluded).
    pub fn held(&self, actor: &ActorId, name: &str) -> u32 {
        self.enforcer.count_held(&self.host, actor, &good(name), false)
    }

    /// Units of `name` the actor holds including the cursor.
    pub fn held_with_cursor(&self, actor: &ActorId, name: &str) -> u32 {
        self.enforcer.count_held(&self.host, actor, &good(name), true)
    }

    /// Units of `name` lying on the ground.
    pub fn on_ground(&self, name: &str) -> u32 {
        self.host.ground_count(&good(name))
    }
}
