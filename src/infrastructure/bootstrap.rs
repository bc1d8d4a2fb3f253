//! Infrastructure bootstrap helpers for engine wiring.

use std::sync::Arc;

use tracing::info;

use crate::application::{Enforcer, LimitRegistry};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{ActorNotifier, LogNotifier, NotifierRegistry};
use crate::port::outbound::scheduler::Scheduler;

/// Build the notifier registry: every notice is logged, then handed to
/// the host's own notifier when one is supplied.
#[must_use]
pub fn build_notifier_registry(host_notifier: Option<Box<dyn ActorNotifier>>) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    if let Some(notifier) = host_notifier {
        registry.register(notifier);
    }
    registry
}

/// Build an enforcement engine from configuration.
///
/// # Errors
///
/// Returns an error if the configured limits do not parse.
#[allow(clippy::result_large_err)]
pub fn build_enforcer(
    config: &Config,
    notifier: Arc<dyn ActorNotifier>,
    scheduler: Arc<dyn Scheduler>,
) -> Result<Enforcer> {
    let registry: Arc<LimitRegistry> = Arc::new(config.registry()?);
    info!(
        limits = registry.len(),
        remediation = %config.enforcement.remediation,
        login_delay_ticks = config.enforcement.login_delay_ticks,
        "Enforcer configured"
    );
    Ok(Enforcer::new(
        registry,
        notifier,
        scheduler,
        config.enforcer_settings(),
    ))
}
