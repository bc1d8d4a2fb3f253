//! Retroactive enforcement of caps against existing holdings.
//!
//! Runs once per session start, deferred so the host can finish loading
//! the actor's inventory, and on demand for operator sweeps. The removal
//! plan is computed in full before any host mutation is issued.

use std::sync::Arc;

use tracing::{debug, info};

use super::messages::MessageTemplates;
use super::registry::LimitRegistry;
use crate::domain::{ActorId, DeferredJob, GoodType, ItemStack, RemediationMode, Ticks};
use crate::port::inbound::limits::LimitQuery;
use crate::port::outbound::container::ContainerHost;
use crate::port::outbound::notifier::ActorNotifier;
use crate::port::outbound::scheduler::Scheduler;

/// Sweeps an actor's holdings and strips units above each cap.
pub struct LoginReconciler {
    registry: Arc<LimitRegistry>,
    notifier: Arc<dyn ActorNotifier>,
    scheduler: Arc<dyn Scheduler>,
    templates: Arc<MessageTemplates>,
    login_delay: Ticks,
    remediation: RemediationMode,
}

impl LoginReconciler {
    /// Create a reconciler.
    pub fn new(
        registry: Arc<LimitRegistry>,
        notifier: Arc<dyn ActorNotifier>,
        scheduler: Arc<dyn Scheduler>,
        templates: Arc<MessageTemplates>,
        login_delay: Ticks,
        remediation: RemediationMode,
    ) -> Self {
        Self {
            registry,
            notifier,
            scheduler,
            templates,
            login_delay: login_delay.max(1),
            remediation,
        }
    }

    /// Queue the session-start sweep for `actor`.
    pub fn schedule(&self, actor: &ActorId) {
        debug!(actor = %actor, delay = self.login_delay, "Reconciliation scheduled");
        self.scheduler
            .run_later(self.login_delay, DeferredJob::Reconcile { actor: *actor });
    }

    /// Deferred session-start sweep. A no-op if the actor left meanwhile.
    pub fn reconcile(&self, host: &mut dyn ContainerHost, actor: &ActorId) -> u32 {
        if !host.is_online(actor) {
            debug!(actor = %actor, "Actor offline, reconciliation abandoned");
            return 0;
        }
        self.enforce_all(host, actor)
    }

    /// Sweep every limited good, sending one summary notice if anything
    /// was removed.
    pub fn enforce_all(&self, host: &mut dyn ContainerHost, actor: &ActorId) -> u32 {
        let plan = self.plan(&*host, actor, self.registry.all_limited_goods());
        let removed = self.apply(host, actor, &plan);

        if removed > 0 {
            info!(actor = %actor, removed, goods = plan.len(), "Excess holdings removed");
            self.notifier.notify(actor, self.templates.removed(removed));
        }
        removed
    }

    /// Strip units of a single good above its cap. Silent; returns the
    /// number removed.
    pub fn enforce_now(&self, host: &mut dyn ContainerHost, actor: &ActorId, good: &GoodType) -> u32 {
        let plan = self.plan(&*host, actor, [good.clone()]);
        self.apply(host, actor, &plan)
    }

    fn plan(
        &self,
        host: &dyn ContainerHost,
        actor: &ActorId,
        goods: impl IntoIterator<Item = GoodType>,
    ) -> Vec<(GoodType, u32)> {
        goods
            .into_iter()
            .filter_map(|good| {
                let limit = self.registry.limit_of(&good)?;
                let held = self.registry.count_held(host, actor, &good, false);
                let excess = held.saturating_sub(limit);
                (excess > 0).then_some((good, excess))
            })
            .collect()
    }

    fn apply(&self, host: &mut dyn ContainerHost, actor: &ActorId, plan: &[(GoodType, u32)]) -> u32 {
        let mut total = 0u32;
        for (good, excess) in plan {
            let removed = host.remove_from_holdings(actor, good, *excess);
            if removed == 0 {
                continue;
            }
            if self.remediation == RemediationMode::Drop {
                host.drop_at_actor_position(actor, ItemStack::new(good.clone(), removed));
            }
            debug!(
                actor = %actor,
                good = %good,
                removed,
                mode = %self.remediation,
                "Excess stripped"
            );
            total = total.saturating_add(removed);
        }
        total
    }
}
