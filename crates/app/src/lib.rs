//! # homesim-app
//!
//! Application layer — the simulator core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Own every device through the [`registry::DeviceRegistry`]
//! - Evaluate rules against the registry in the [`automation_engine::AutomationEngine`]
//! - Define **port traits** that adapters implement:
//!   - `Clock` — source of "now" for timestamps and hour conditions
//!   - `Integration` — seeds devices and advances their simulated physics
//! - Compose everything into a [`home::Home`] that advances in discrete,
//!   atomic units (a tick or a user command), driven by the [`ticker`]
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only (plus `tokio` for the tick loop).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod home;
pub mod ports;
pub mod registry;
pub mod ticker;
