//! Scheduler port for continuations that must run on a later tick.

use crate::domain::{DeferredJob, Ticks};

/// Host scheduler primitive.
///
/// Jobs are plain data; the host hands each due job back to the engine
/// (see `Enforcer::run_job`) on the tick it falls due.
pub trait Scheduler: Send + Sync {
    /// Queue `job` to run after `delay` ticks (at least one).
    fn run_later(&self, delay: Ticks, job: DeferredJob);
}
