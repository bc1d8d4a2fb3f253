//! Mutation interception.
//!
//! Every inventory event runs through the same pipeline: classify the
//! pathway into pending mutations, count what the actor already holds,
//! arbitrate, then translate the verdict into what the host must do with
//! the event. Work that cannot happen while the event is still being
//! dispatched is scheduled as a [`DeferredJob`].

use std::sync::Arc;

use tracing::{debug, info};

use super::arbitration::{arbitrate, arbitrate_pending};
use super::cooldown::RefreshCooldown;
use super::messages::MessageTemplates;
use super::registry::LimitRegistry;
use crate::domain::{
    ActorId, DeferredJob, GoodType, Interception, ItemStack, Pathway, PendingMutation, Ticks,
    Verdict,
};
use crate::port::inbound::limits::LimitQuery;
use crate::port::outbound::container::ContainerHost;
use crate::port::outbound::notifier::{ActorNotifier, NoticeKind};
use crate::port::outbound::scheduler::Scheduler;

/// Arbitrates inventory events against the limit registry.
///
/// Stateless between events apart from the presentation-only refresh
/// cooldown.
pub struct MutationInterceptor {
    registry: Arc<LimitRegistry>,
    notifier: Arc<dyn ActorNotifier>,
    scheduler: Arc<dyn Scheduler>,
    templates: Arc<MessageTemplates>,
    cooldown: RefreshCooldown,
    transfer_delay: Ticks,
}

impl MutationInterceptor {
    /// Create an interceptor.
    pub fn new(
        registry: Arc<LimitRegistry>,
        notifier: Arc<dyn ActorNotifier>,
        scheduler: Arc<dyn Scheduler>,
        templates: Arc<MessageTemplates>,
        cooldown: RefreshCooldown,
        transfer_delay: Ticks,
    ) -> Self {
        Self {
            registry,
            notifier,
            scheduler,
            templates,
            cooldown,
            transfer_delay: transfer_delay.max(1),
        }
    }

    /// Arbitrate one event and tell the host what to do with it.
    pub fn intercept(
        &self,
        host: &mut dyn ContainerHost,
        actor: &ActorId,
        pathway: &Pathway,
    ) -> Interception {
        let Some((pending, verdict)) = self.first_refusal(&*host, actor, pathway) else {
            return Interception::Proceed;
        };

        if pathway.diverts_cursor() {
            return self.divert_later(actor, pathway, &pending, verdict);
        }

        match verdict {
            Verdict::Allow => Interception::Proceed,
            Verdict::Reject { reason, limit } => {
                info!(
                    actor = %actor,
                    pathway = pathway.name(),
                    good = %pending.good,
                    quantity = pending.quantity,
                    limit,
                    reason = %reason,
                    "Addition rejected"
                );
                self.block(host, actor, pathway, &pending.good, limit)
            }
            Verdict::Partial {
                accepted,
                remainder,
                limit,
            } => match pathway {
                Pathway::CursorPlace { swaps: true, .. } => {
                    info!(
                        actor = %actor,
                        good = %pending.good,
                        quantity = pending.quantity,
                        accepted,
                        limit,
                        "Swap rejected, stack cannot be split"
                    );
                    self.block(host, actor, pathway, &pending.good, limit)
                }
                Pathway::BulkTransfer { slot, .. } => {
                    self.refresh(host, actor);
                    let room = host.holdings_room(actor, &pending.good);
                    let accepted = accepted.min(room);
                    if accepted == 0 {
                        debug!(
                            actor = %actor,
                            good = %pending.good,
                            "No room in holdings, transfer dropped"
                        );
                        return Interception::Cancel;
                    }
                    let remainder = pending.quantity - accepted;
                    self.clamped(actor, pathway, &pending.good, accepted, remainder, limit);
                    self.scheduler.run_later(
                        self.transfer_delay,
                        DeferredJob::CompleteTransfer {
                            actor: *actor,
                            slot: *slot,
                            good: pending.good,
                            quantity: accepted,
                        },
                    );
                    Interception::Cancel
                }
                Pathway::GroundPickup { .. } | Pathway::CursorPlace { .. } | Pathway::Drag { .. } => {
                    self.clamped(actor, pathway, &pending.good, accepted, remainder, limit);
                    Interception::Trim {
                        accepted,
                        remainder,
                    }
                }
                // Cursor diverts returned above; hand swaps carry no
                // quantity and withdrawals never add.
                Pathway::HandSwap { .. }
                | Pathway::Withdraw
                | Pathway::CloseView
                | Pathway::DropKey => Interception::Cancel,
            },
        }
    }

    /// Finish a clamped bulk transfer, re-counting against the cap first.
    ///
    /// Returns the units moved into holdings.
    pub fn complete_transfer(
        &self,
        host: &mut dyn ContainerHost,
        actor: &ActorId,
        slot: usize,
        good: &GoodType,
        quantity: u32,
    ) -> u32 {
        if !host.is_online(actor) {
            debug!(actor = %actor, good = %good, "Actor offline, transfer abandoned");
            return 0;
        }

        let under_cap = match self.registry.limit_of(good) {
            None => quantity,
            Some(limit) => {
                let current = self.registry.count_held(&*host, actor, good, true);
                limit.saturating_sub(current).min(quantity)
            }
        };
        // Units with no room stay in the source container
        let fits = under_cap.min(host.holdings_room(actor, good));
        if fits == 0 {
            debug!(actor = %actor, good = %good, "Transfer no longer fits");
            return 0;
        }

        let taken = host.take_from_open_container(actor, slot, good, fits);
        if taken == 0 {
            debug!(actor = %actor, slot, good = %good, "Transfer source gone");
            return 0;
        }

        let leftover = host.insert_into_holdings(actor, ItemStack::new(good.clone(), taken));
        if leftover > 0 {
            host.drop_at_actor_position(actor, ItemStack::new(good.clone(), leftover));
        }

        debug!(actor = %actor, good = %good, moved = taken - leftover, "Transfer completed");
        taken - leftover
    }

    /// Divert a capped cursor stack to the ground at the actor's current
    /// position.
    ///
    /// Re-arbitrates against the live count first; a cursor that fits by
    /// now is left alone. Hosts that fold the cursor back into holdings on
    /// close leave it empty here, in which case the same quantity is taken
    /// back out of holdings while they exceed the cap. Returns the units
    /// diverted.
    pub fn divert_cursor(
        &self,
        host: &mut dyn ContainerHost,
        actor: &ActorId,
        good: &GoodType,
        quantity: u32,
    ) -> u32 {
        if !host.is_online(actor) {
            debug!(actor = %actor, good = %good, "Actor offline, cursor divert abandoned");
            return 0;
        }
        let Some(limit) = self.registry.limit_of(good) else {
            debug!(actor = %actor, good = %good, "Limit lifted, cursor divert skipped");
            return 0;
        };

        let on_cursor = host.cursor(actor).filter(|stack| stack.good() == good).cloned();
        let current = self.registry.count_held(&*host, actor, good, false);

        let amount = match on_cursor {
            Some(stack) => {
                if arbitrate(Some(limit), current, stack.quantity()).is_allowed() {
                    debug!(actor = %actor, good = %good, "Cursor fits, divert skipped");
                    return 0;
                }
                let amount = stack.quantity();
                host.set_cursor(actor, None);
                host.drop_at_actor_position(actor, stack);
                amount
            }
            None => {
                if current <= limit {
                    return 0;
                }
                let removed = host.remove_from_holdings(actor, good, quantity.min(current));
                if removed == 0 {
                    return 0;
                }
                host.drop_at_actor_position(actor, ItemStack::new(good.clone(), removed));
                removed
            }
        };

        self.notifier
            .notify(actor, self.templates.diverted(good, limit, amount));
        info!(actor = %actor, good = %good, amount, limit, "Cursor stack diverted to ground");
        amount
    }

    /// Forget per-actor presentation state.
    pub fn forget(&self, actor: &ActorId) {
        self.cooldown.forget(actor);
    }

    fn first_refusal(
        &self,
        host: &dyn ContainerHost,
        actor: &ActorId,
        pathway: &Pathway,
    ) -> Option<(PendingMutation, Verdict)> {
        for pending in pathway.classify(host.cursor(actor)).into_iter().flatten() {
            let Some(limit) = self.registry.limit_of(&pending.good) else {
                continue;
            };
            let current =
                self.registry
                    .count_held(host, actor, &pending.good, pending.include_in_transit);
            let verdict = arbitrate_pending(&pending, Some(limit), current);

            debug!(
                actor = %actor,
                pathway = pathway.name(),
                good = %pending.good,
                quantity = pending.quantity,
                current,
                limit,
                verdict = ?verdict,
                "Arbitrated"
            );

            if !verdict.is_allowed() {
                return Some((pending, verdict));
            }
        }
        None
    }

    fn divert_later(
        &self,
        actor: &ActorId,
        pathway: &Pathway,
        pending: &PendingMutation,
        verdict: Verdict,
    ) -> Interception {
        debug!(
            actor = %actor,
            pathway = pathway.name(),
            good = %pending.good,
            verdict = ?verdict,
            "Cursor divert scheduled"
        );
        self.scheduler.run_later(
            self.transfer_delay,
            DeferredJob::DivertCursor {
                actor: *actor,
                good: pending.good.clone(),
                quantity: pending.quantity,
            },
        );
        Interception::Proceed
    }

    fn block(
        &self,
        host: &mut dyn ContainerHost,
        actor: &ActorId,
        pathway: &Pathway,
        good: &GoodType,
        limit: u32,
    ) -> Interception {
        let kind = if matches!(pathway, Pathway::GroundPickup { .. }) {
            NoticeKind::PickupBlocked
        } else {
            self.refresh(host, actor);
            NoticeKind::PlaceBlocked
        };
        self.notifier
            .notify(actor, self.templates.blocked(kind, good, limit));
        Interception::Cancel
    }

    fn clamped(
        &self,
        actor: &ActorId,
        pathway: &Pathway,
        good: &GoodType,
        accepted: u32,
        remainder: u32,
        limit: u32,
    ) {
        info!(
            actor = %actor,
            pathway = pathway.name(),
            good = %good,
            accepted,
            remainder,
            limit,
            "Addition clamped"
        );
        self.notifier
            .notify(actor, self.templates.partial(good, limit, accepted));
    }

    fn refresh(&self, host: &mut dyn ContainerHost, actor: &ActorId) {
        if self.cooldown.try_acquire(actor) {
            host.refresh_view(actor);
        }
    }
}
