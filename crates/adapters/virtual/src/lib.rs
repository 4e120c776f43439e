//! # homesim-adapter-virtual
//!
//! Virtual integration: seeds the demo home and simulates device physics.
//!
//! ## Provided devices
//!
//! | Room | Devices |
//! |------|---------|
//! | Living Room | 2 lights, thermostat, window, fan |
//! | Kitchen | 2 lights, thermostat, window |
//! | Bedroom | 2 lights, thermostat, window, fan |
//! | Bathroom | light, window |
//! | Entrance | light, camera, door |
//!
//! ## Behaviour per tick
//!
//! - Powered thermostats move [`DRIFT_STEP`] °C toward their target
//! - Camera motion clears once it has been reported for the hold time
//! - Fan timers count down once per simulated minute
//!
//! ## Dependency rule
//!
//! Depends on `homesim-app` (port traits) and `homesim-domain` only.

mod catalogue;

use std::collections::HashMap;
use std::time::Duration;

use homesim_app::ports::Integration;
use homesim_app::registry::DeviceRegistry;
use homesim_domain::device::{Attribute, AttributeValue, DeviceKind};
use homesim_domain::error::HomeError;
use homesim_domain::id::DeviceId;
use homesim_domain::time::Timestamp;

use catalogue::CATALOGUE;

/// Room temperature change per tick, in °C.
pub const DRIFT_STEP: f64 = 0.5;

const MINUTE: Duration = Duration::from_secs(60);

/// Virtual integration that creates and animates the demo home.
pub struct VirtualIntegration {
    motion_hold: Duration,
    /// When each camera's current motion was first observed.
    motion_since: HashMap<DeviceId, Timestamp>,
    /// Elapsed time not yet spent on fan timers.
    timer_carry: Duration,
}

impl Default for VirtualIntegration {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl VirtualIntegration {
    #[must_use]
    pub fn new(motion_hold: Duration) -> Self {
        Self {
            motion_hold,
            motion_since: HashMap::new(),
            timer_carry: Duration::ZERO,
        }
    }

    fn drift_thermostats(registry: &mut DeviceRegistry, now: Timestamp) -> usize {
        registry
            .iter_mut()
            .map(|d| d.drift_temperature(DRIFT_STEP, now))
            .filter(|changed| *changed)
            .count()
    }

    fn clear_motion(&mut self, registry: &mut DeviceRegistry, now: Timestamp) -> usize {
        let Ok(hold) = chrono::Duration::from_std(self.motion_hold) else {
            return 0;
        };
        let mut expired = Vec::new();
        let mut active = HashMap::new();
        for camera in registry.of_kind(DeviceKind::Camera) {
            if camera.get(Attribute::MotionDetected) != Some(AttributeValue::Bool(true)) {
                continue;
            }
            let since = self.motion_since.get(&camera.id()).copied().unwrap_or(now);
            if now - since >= hold {
                expired.push(camera.id());
            } else {
                active.insert(camera.id(), since);
            }
        }
        self.motion_since = active;

        let mut cleared = 0;
        for id in expired {
            let cleared_motion =
                registry.set_attribute(id, Attribute::MotionDetected, &AttributeValue::Bool(false), now);
            match cleared_motion {
                Ok(()) => cleared += 1,
                Err(err) => tracing::warn!(%id, error = %err, "could not clear motion"),
            }
        }
        cleared
    }

    fn run_fan_timers(&mut self, registry: &mut DeviceRegistry, elapsed: Duration, now: Timestamp) -> usize {
        self.timer_carry += elapsed;
        let mut changed = 0;
        while self.timer_carry >= MINUTE {
            self.timer_carry -= MINUTE;
            changed += registry
                .iter_mut()
                .map(|d| d.count_down_timer(now))
                .filter(|changed| *changed)
                .count();
        }
        changed
    }
}

impl Integration for VirtualIntegration {
    fn name(&self) -> &'static str {
        "virtual"
    }

    fn setup(&mut self, registry: &mut DeviceRegistry) -> Result<(), HomeError> {
        for seed in CATALOGUE {
            registry.create_device(seed.kind, seed.name, seed.room, seed.attributes.iter().cloned())?;
        }
        tracing::debug!(devices = CATALOGUE.len(), "virtual devices created");
        Ok(())
    }

    fn step(&mut self, registry: &mut DeviceRegistry, elapsed: Duration, now: Timestamp) -> usize {
        Self::drift_thermostats(registry, now)
            + self.clear_motion(registry, now)
            + self.run_fan_timers(registry, elapsed, now)
    }
}
