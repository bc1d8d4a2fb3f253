//! Scenario replay against the in-memory host.
//!
//! A scenario is a JSON list of host actions. Each action runs through the
//! configured engine exactly as a live host would drive it, and the
//! resulting interception and any notices are printed per step.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::memory::{MemoryHost, Position};
use crate::adapter::outbound::scheduler::TickScheduler;
use crate::application::Enforcer;
use crate::domain::{ActorId, ContainerSide, DragLanding, GoodType, ItemStack};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::{build_enforcer, build_notifier_registry};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::limits::{LimitEnforcement, LimitQuery};
use crate::port::outbound::container::ContainerHost;
use crate::port::outbound::notifier::{ActorNotifier, Notice};

/// A scripted run of host actions.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

/// A stack named in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct StackSpec {
    pub item: String,
    pub quantity: u32,
}

/// One host action.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Connect (or reconnect) an actor and start their session.
    Join { actor: String },
    /// End an actor's session.
    Leave { actor: String },
    /// Move an actor.
    Move { actor: String, to: Position },
    /// Put items straight into holdings, bypassing limits.
    Give {
        actor: String,
        #[serde(flatten)]
        stack: StackSpec,
    },
    /// Put a stack on the cursor, bypassing limits.
    Cursor {
        actor: String,
        #[serde(flatten)]
        stack: StackSpec,
    },
    /// Spawn a stack on the ground.
    Spawn {
        #[serde(flatten)]
        stack: StackSpec,
        #[serde(default)]
        at: Position,
    },
    /// Pick up the oldest ground stack of `item`.
    PickUp { actor: String, item: String },
    /// Open a foreign container holding `contents`.
    Open {
        actor: String,
        contents: Vec<StackSpec>,
    },
    /// Place the cursor stack into a slot.
    Place {
        actor: String,
        side: ContainerSide,
        slot: usize,
    },
    /// Shift-click a slot.
    Transfer {
        actor: String,
        side: ContainerSide,
        slot: usize,
    },
    /// Drag the cursor stack across slots.
    Drag {
        actor: String,
        landings: Vec<DragLanding>,
    },
    /// Swap main-hand and off-hand.
    SwapHands { actor: String },
    /// Close the inventory view.
    Close { actor: String },
    /// Press the drop key.
    Drop { actor: String },
    /// Run the operator sweep.
    Enforce { actor: String },
    /// Advance the clock, running due jobs.
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
}

const fn one() -> u32 {
    1
}

impl Step {
    const fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Move { .. } => "move",
            Self::Give { .. } => "give",
            Self::Cursor { .. } => "cursor",
            Self::Spawn { .. } => "spawn",
            Self::PickUp { .. } => "pick_up",
            Self::Open { .. } => "open",
            Self::Place { .. } => "place",
            Self::Transfer { .. } => "transfer",
            Self::Drag { .. } => "drag",
            Self::SwapHands { .. } => "swap_hands",
            Self::Close { .. } => "close",
            Self::Drop { .. } => "drop",
            Self::Enforce { .. } => "enforce",
            Self::Tick { .. } => "tick",
        }
    }
}

/// Notices captured for printing after each step.
#[derive(Clone, Default)]
struct NoticeLog {
    entries: Arc<Mutex<Vec<(ActorId, Notice)>>>,
}

impl NoticeLog {
    fn drain(&self) -> Vec<(ActorId, Notice)> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl ActorNotifier for NoticeLog {
    fn notify(&self, actor: &ActorId, notice: Notice) {
        self.entries.lock().push((*actor, notice));
    }
}

struct Simulation {
    host: MemoryHost,
    scheduler: Arc<TickScheduler>,
    enforcer: Enforcer,
    actors: BTreeMap<String, ActorId>,
}

impl Simulation {
    fn actor(&self, index: usize, name: &str) -> Result<ActorId> {
        self.actors.get(name).copied().ok_or_else(|| Error::Scenario {
            step: index,
            reason: format!("actor '{name}' has not joined"),
        })
    }

    fn stack(index: usize, spec: &StackSpec) -> Result<ItemStack> {
        let good = GoodType::parse(&spec.item).map_err(|e| Error::Scenario {
            step: index,
            reason: e.to_string(),
        })?;
        Ok(ItemStack::new(good, spec.quantity))
    }

    fn run(&mut self, index: usize, step: &Step) -> Result<String> {
        let enforcer = &self.enforcer;
        let outcome = match step {
            Step::Join { actor } => {
                let id = match self.actors.get(actor) {
                    Some(id) => {
                        self.host.rejoin(id);
                        *id
                    }
                    None => {
                        let id = self.host.join();
                        self.actors.insert(actor.clone(), id);
                        id
                    }
                };
                enforcer.on_session_start(&id);
                "ok".to_string()
            }
            Step::Leave { actor } => {
                let id = self.actor(index, actor)?;
                self.host.leave(&id);
                enforcer.on_session_end(&id);
                "ok".to_string()
            }
            Step::Move { actor, to } => {
                let id = self.actor(index, actor)?;
                self.host.set_position(&id, *to);
                "ok".to_string()
            }
            Step::Give { actor, stack } => {
                let id = self.actor(index, actor)?;
                let leftover = self.host.insert_into_holdings(&id, Self::stack(index, stack)?);
                if leftover > 0 {
                    format!("{leftover} did not fit")
                } else {
                    "ok".to_string()
                }
            }
            Step::Cursor { actor, stack } => {
                let id = self.actor(index, actor)?;
                self.host.put_on_cursor(&id, Self::stack(index, stack)?);
                "ok".to_string()
            }
            Step::Spawn { stack, at } => {
                self.host.spawn_ground(*at, Self::stack(index, stack)?);
                "ok".to_string()
            }
            Step::PickUp { actor, item } => {
                let id = self.actor(index, actor)?;
                let good = GoodType::parse(item).map_err(|e| Error::Scenario {
                    step: index,
                    reason: e.to_string(),
                })?;
                let ground_id = self
                    .host
                    .ground()
                    .iter()
                    .find(|ground| ground.stack.good() == &good)
                    .map(|ground| ground.id)
                    .ok_or_else(|| Error::Scenario {
                        step: index,
                        reason: format!("no {good} on the ground"),
                    })?;
                self.host.pick_up(enforcer, &id, ground_id).to_string()
            }
            Step::Open { actor, contents } => {
                let id = self.actor(index, actor)?;
                let slots = contents
                    .iter()
                    .map(|spec| Self::stack(index, spec).map(Some))
                    .collect::<Result<Vec<_>>>()?;
                self.host.open_container(&id, slots);
                "ok".to_string()
            }
            Step::Place { actor, side, slot } => {
                let id = self.actor(index, actor)?;
                self.host.place_cursor(enforcer, &id, *side, *slot).to_string()
            }
            Step::Transfer { actor, side, slot } => {
                let id = self.actor(index, actor)?;
                self.host
                    .shift_transfer(enforcer, &id, *side, *slot)
                    .to_string()
            }
            Step::Drag { actor, landings } => {
                let id = self.actor(index, actor)?;
                self.host.drag(enforcer, &id, landings.clone()).to_string()
            }
            Step::SwapHands { actor } => {
                let id = self.actor(index, actor)?;
                self.host.swap_hands(enforcer, &id).to_string()
            }
            Step::Close { actor } => {
                let id = self.actor(index, actor)?;
                self.host.close_view(enforcer, &id).to_string()
            }
            Step::Drop { actor } => {
                let id = self.actor(index, actor)?;
                self.host.press_drop(enforcer, &id).to_string()
            }
            Step::Enforce { actor } => {
                let id = self.actor(index, actor)?;
                let removed = enforcer.enforce_all(&mut self.host, &id);
                format!("{removed} removed")
            }
            Step::Tick { count } => {
                let mut ran = 0usize;
                for _ in 0..*count {
                    for job in self.scheduler.advance() {
                        enforcer.run_job(&mut self.host, &job);
                        ran += 1;
                    }
                }
                format!("{ran} jobs")
            }
        };
        Ok(outcome)
    }
}

/// Execute `simulate`.
pub fn execute(scenario_path: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();
    let content = std::fs::read_to_string(scenario_path)?;
    let scenario: Scenario = serde_json::from_str(&content)?;

    let log = NoticeLog::default();
    let notifier = Arc::new(build_notifier_registry(Some(Box::new(log.clone()))));
    let scheduler = Arc::new(TickScheduler::new());
    let enforcer = build_enforcer(&config, notifier, scheduler.clone())?;

    let mut simulation = Simulation {
        host: MemoryHost::new(),
        scheduler,
        enforcer,
        actors: BTreeMap::new(),
    };
    let mut names: BTreeMap<ActorId, String> = BTreeMap::new();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Steps");

    for (index, step) in scenario.steps.iter().enumerate() {
        let outcome = simulation.run(index + 1, step)?;
        if let Step::Join { actor } = step {
            if let Some(id) = simulation.actors.get(actor) {
                names.insert(*id, actor.clone());
            }
        }
        output::step(index + 1, step.name(), &outcome);
        for (actor, notice) in log.drain() {
            let name = names.get(&actor).map_or("?", String::as_str);
            output::notice(name, notice.kind.as_str(), &notice.text);
        }
    }

    report_holdings(&simulation);
    Ok(())
}

fn report_holdings(simulation: &Simulation) {
    let limits = simulation.enforcer.registry().limits();

    if output::is_json() {
        let actors: Vec<_> = simulation
            .actors
            .iter()
            .map(|(name, id)| {
                let held: Vec<_> = limits
                    .iter()
                    .map(|(good, limit)| {
                        json!({
                            "item": good.as_str(),
                            "held": simulation.enforcer.count_held(&simulation.host, id, good, true),
                            "limit": limit,
                        })
                    })
                    .collect();
                json!({ "actor": name, "holdings": held })
            })
            .collect();
        output::json_output(json!({
            "command": "simulate",
            "actors": actors,
            "pending_jobs": simulation.scheduler.pending(),
        }));
        return;
    }

    output::section("Holdings");
    for (name, id) in &simulation.actors {
        for (good, limit) in &limits {
            let held = simulation
                .enforcer
                .count_held(&simulation.host, id, good, true);
            if held > 0 || output::verbosity() > 0 {
                output::field(name, format!("{held}/{limit} {}", good.display_name()));
            }
        }
    }
    if simulation.scheduler.pending() > 0 {
        output::warning(&format!(
            "{} jobs still pending; add a tick step to run them",
            simulation.scheduler.pending()
        ));
    }
}
