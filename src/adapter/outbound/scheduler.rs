//! Tick-driven scheduler.
//!
//! Keeps deferred jobs ordered by the tick they fall due and the order
//! they were queued. The host advances the clock once per tick and hands
//! whatever came due to `Enforcer::run_job`.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{DeferredJob, Ticks};
use crate::port::outbound::scheduler::Scheduler;

#[derive(Debug, Default)]
struct Queue {
    now: u64,
    seq: u64,
    jobs: BTreeMap<(u64, u64), DeferredJob>,
}

/// A [`Scheduler`] driven by explicit tick advances.
#[derive(Debug, Default)]
pub struct TickScheduler {
    queue: Mutex<Queue>,
}

impl TickScheduler {
    /// Create a scheduler at tick zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock one tick and return the jobs now due, oldest
    /// first.
    pub fn advance(&self) -> Vec<DeferredJob> {
        let mut queue = self.queue.lock();
        queue.now += 1;
        let cutoff = (queue.now + 1, 0);
        let later = queue.jobs.split_off(&cutoff);
        let due = std::mem::replace(&mut queue.jobs, later);
        due.into_values().collect()
    }

    /// Number of jobs still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.lock().jobs.len()
    }

    /// Ticks elapsed since creation.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.queue.lock().now
    }
}

impl Scheduler for TickScheduler {
    fn run_later(&self, delay: Ticks, job: DeferredJob) {
        let mut queue = self.queue.lock();
        let due = queue.now + u64::from(delay.max(1));
        let seq = queue.seq;
        queue.seq += 1;
        debug!(job = job.name(), actor = %job.actor(), due, "Job scheduled");
        queue.jobs.insert((due, seq), job);
    }
}
