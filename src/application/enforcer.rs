//! Enforcement facade.
//!
//! Wires the registry, interceptor and reconciler together behind the
//! entry points a host needs: one call per inventory event, one per
//! session start/end, and one per due deferred job.

use std::sync::Arc;
use std::time::Duration;

use super::cooldown::RefreshCooldown;
use super::interceptor::MutationInterceptor;
use super::messages::MessageTemplates;
use super::reconciler::LoginReconciler;
use super::registry::LimitRegistry;
use crate::domain::{ActorId, DeferredJob, GoodType, Interception, Pathway, RemediationMode, Ticks};
use crate::port::inbound::limits::{LimitEnforcement, LimitQuery};
use crate::port::outbound::container::ContainerHost;
use crate::port::outbound::notifier::ActorNotifier;
use crate::port::outbound::scheduler::Scheduler;

/// Tunables for the enforcement engine.
#[derive(Debug, Clone)]
pub struct EnforcerSettings {
    /// Delay between session start and reconciliation.
    pub login_delay: Ticks,
    /// Delay before deferred transfers and cursor diverts run.
    pub transfer_delay: Ticks,
    /// Fate of units stripped by reconciliation.
    pub remediation: RemediationMode,
    /// Minimum spacing between view refreshes for one actor.
    pub refresh_cooldown: Duration,
    /// Maximum actors tracked by the refresh cooldown.
    pub cooldown_capacity: usize,
    /// Notice templates.
    pub templates: MessageTemplates,
}

impl Default for EnforcerSettings {
    fn default() -> Self {
        Self {
            login_delay: 20,
            transfer_delay: 1,
            remediation: RemediationMode::Drop,
            refresh_cooldown: Duration::from_millis(150),
            cooldown_capacity: 4096,
            templates: MessageTemplates::default(),
        }
    }
}

/// The item limit enforcement engine.
pub struct Enforcer {
    registry: Arc<LimitRegistry>,
    interceptor: MutationInterceptor,
    reconciler: LoginReconciler,
}

impl Enforcer {
    /// Build an engine around a registry and the host's notifier and
    /// scheduler.
    pub fn new(
        registry: Arc<LimitRegistry>,
        notifier: Arc<dyn ActorNotifier>,
        scheduler: Arc<dyn Scheduler>,
        settings: EnforcerSettings,
    ) -> Self {
        let templates = Arc::new(settings.templates);
        let interceptor = MutationInterceptor::new(
            Arc::clone(&registry),
            Arc::clone(&notifier),
            Arc::clone(&scheduler),
            Arc::clone(&templates),
            RefreshCooldown::new(settings.refresh_cooldown, settings.cooldown_capacity),
            settings.transfer_delay,
        );
        let reconciler = LoginReconciler::new(
            Arc::clone(&registry),
            notifier,
            scheduler,
            templates,
            settings.login_delay,
            settings.remediation,
        );
        Self {
            registry,
            interceptor,
            reconciler,
        }
    }

    /// The shared limit registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<LimitRegistry> {
        &self.registry
    }

    /// Arbitrate one inventory event.
    pub fn intercept(
        &self,
        host: &mut dyn ContainerHost,
        actor: &ActorId,
        pathway: &Pathway,
    ) -> Interception {
        self.interceptor.intercept(host, actor, pathway)
    }

    /// An actor's session started; schedule reconciliation.
    pub fn on_session_start(&self, actor: &ActorId) {
        self.reconciler.schedule(actor);
    }

    /// An actor's session ended; drop per-actor presentation state.
    pub fn on_session_end(&self, actor: &ActorId) {
        self.interceptor.forget(actor);
    }

    /// Run a job the scheduler reports as due. Returns the units moved,
    /// removed or diverted.
    pub fn run_job(&self, host: &mut dyn ContainerHost, job: &DeferredJob) -> u32 {
        match job {
            DeferredJob::Reconcile { actor } => self.reconciler.reconcile(host, actor),
            DeferredJob::CompleteTransfer {
                actor,
                slot,
                good,
                quantity,
            } => self
                .interceptor
                .complete_transfer(host, actor, *slot, good, *quantity),
            DeferredJob::DivertCursor {
                actor,
                good,
                quantity,
            } => self
                .interceptor
                .divert_cursor(host, actor, good, *quantity),
        }
    }
}

impl LimitQuery for Enforcer {
    fn is_limited(&self, good: &GoodType) -> bool {
        self.registry.is_limited(good)
    }

    fn limit_of(&self, good: &GoodType) -> Option<u32> {
        self.registry.limit_of(good)
    }

    fn all_limited_goods(&self) -> Vec<GoodType> {
        self.registry.all_limited_goods()
    }

    fn count_held(
        &self,
        host: &dyn ContainerHost,
        actor: &ActorId,
        good: &GoodType,
        include_in_transit: bool,
    ) -> u32 {
        self.registry
            .count_held(host, actor, good, include_in_transit)
    }
}

impl LimitEnforcement for Enforcer {
    fn enforce_now(&self, host: &mut dyn ContainerHost, actor: &ActorId, good: &GoodType) -> u32 {
        self.reconciler.enforce_now(host, actor, good)
    }

    fn enforce_all(&self, host: &mut dyn ContainerHost, actor: &ActorId) -> u32 {
        self.reconciler.enforce_all(host, actor)
    }
}
