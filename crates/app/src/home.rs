//! Home — the registry, the rule engine and the simulation as one unit.
//!
//! State advances only through [`Home::tick`] and [`Home::apply`]. Each is
//! atomic with respect to the others: callers hold the `Home` exclusively
//! for the duration of the call, so a rule pass never observes a half-applied
//! user command.

use std::time::Duration;

use homesim_domain::automation::Rule;
use homesim_domain::device::{Attribute, AttributeValue};
use homesim_domain::error::HomeError;
use homesim_domain::id::{DeviceId, RuleId};
use homesim_domain::time::Timestamp;

use crate::automation_engine::{AutomationEngine, Evaluation};
use crate::ports::{Clock, Integration};
use crate::registry::DeviceRegistry;

/// A user-initiated device mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    SetAttribute {
        device: DeviceId,
        attribute: Attribute,
        value: AttributeValue,
    },
    TogglePower {
        device: DeviceId,
    },
}

/// The most recent failed user mutation, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub at: Timestamp,
}

impl Notice {
    /// Whether the notice is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: Timestamp, ttl: Duration) -> bool {
        chrono::Duration::from_std(ttl).is_ok_and(|ttl| now - self.at < ttl)
    }
}

pub struct Home<C, I> {
    registry: DeviceRegistry,
    engine: AutomationEngine<C>,
    integration: I,
    tick_count: u64,
    last_tick: Option<Timestamp>,
    notice: Option<Notice>,
}

impl<C: Clock, I: Integration> Home<C, I> {
    /// Build a home and let `integration` seed its devices.
    ///
    /// # Errors
    ///
    /// Returns the first [`HomeError`] raised while seeding.
    pub fn new(clock: C, mut integration: I) -> Result<Self, HomeError> {
        let mut registry = DeviceRegistry::new();
        integration.setup(&mut registry)?;
        tracing::info!(
            integration = integration.name(),
            devices = registry.len(),
            rooms = registry.rooms().len(),
            "home seeded"
        );
        Ok(Self {
            registry,
            engine: AutomationEngine::new(clock),
            integration,
            tick_count: 0,
            last_tick: None,
            notice: None,
        })
    }

    /// Register rules in order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error; rules before it stay registered.
    pub fn register_rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> Result<(), HomeError> {
        for rule in rules {
            self.engine.register_rule(rule)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn engine(&self) -> &AutomationEngine<C> {
        &self.engine
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn last_tick(&self) -> Option<Timestamp> {
        self.last_tick
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.engine.clock().now()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Record a failure for display, replacing any earlier notice.
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "mutation rejected");
        self.notice = Some(Notice {
            message,
            at: self.now(),
        });
    }

    /// Advance the simulation by `elapsed`, then evaluate every rule.
    ///
    /// While automation is switched off the simulation is paused too; the
    /// tick is still counted.
    pub fn tick(&mut self, elapsed: Duration) -> Evaluation {
        let now = self.now();
        let changed = if self.engine.is_automation_enabled() {
            self.integration.step(&mut self.registry, elapsed, now)
        } else {
            0
        };
        let evaluation = self.engine.evaluate_all(&mut self.registry);
        self.tick_count += 1;
        self.last_tick = Some(now);
        tracing::debug!(
            tick = self.tick_count,
            changed,
            triggered = evaluation.triggered.len(),
            failures = evaluation.failures.len(),
            "tick"
        );
        evaluation
    }

    /// Apply a user command, then evaluate every rule.
    ///
    /// # Errors
    ///
    /// Returns the command's [`HomeError`]. The failure is also kept as the
    /// current [`Notice`], and no rules run.
    pub fn apply(&mut self, command: DeviceCommand) -> Result<Evaluation, HomeError> {
        let now = self.now();
        let result = match &command {
            DeviceCommand::SetAttribute {
                device,
                attribute,
                value,
            } => self.registry.set_attribute(*device, *attribute, value, now),
            DeviceCommand::TogglePower { device } => {
                self.registry.toggle_power(*device, now).map(|_| ())
            }
        };
        match result {
            Ok(()) => {
                tracing::debug!(?command, "command applied");
                Ok(self.engine.evaluate_all(&mut self.registry))
            }
            Err(err) => {
                self.notify(err.to_string());
                Err(err)
            }
        }
    }

    /// Enable or disable one rule, then evaluate every rule.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] for an unknown rule.
    pub fn set_rule_enabled(&mut self, id: RuleId, enabled: bool) -> Result<Evaluation, HomeError> {
        if let Err(err) = self.engine.set_enabled(id, enabled) {
            self.notify(err.to_string());
            return Err(err);
        }
        Ok(self.engine.evaluate_all(&mut self.registry))
    }

    /// Flip the global automation switch, then evaluate every rule.
    pub fn set_automation_enabled(&mut self, enabled: bool) -> Evaluation {
        self.engine.set_automation_enabled(enabled);
        self.engine.evaluate_all(&mut self.registry)
    }
}
