//! Integration port — the source of devices and their simulated physics.
//!
//! An integration seeds the registry on startup and then advances device
//! state on every tick (temperatures drifting, motion clearing, timers
//! running out). The only implementation today is the virtual simulator.

use std::time::Duration;

use homesim_domain::error::HomeError;
use homesim_domain::time::Timestamp;

use crate::registry::DeviceRegistry;

/// A pluggable device integration.
///
/// Implementations live in adapter crates (e.g. `adapter_virtual`).
/// [`Home`](crate::home::Home) calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup) — create the integration's devices
/// 2. [`step`](Self::step) — once per tick, before rules are evaluated
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"virtual"`).
    fn name(&self) -> &'static str;

    /// Create the integration's devices in `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`HomeError`] raised while creating a device.
    fn setup(&mut self, registry: &mut DeviceRegistry) -> Result<(), HomeError>;

    /// Advance simulated physics by `elapsed`. Returns how many devices changed.
    fn step(&mut self, registry: &mut DeviceRegistry, elapsed: Duration, now: Timestamp) -> usize;
}
