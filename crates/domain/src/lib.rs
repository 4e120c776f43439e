//! # homesim-domain
//!
//! Pure domain model for the homesim smart-home simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** as a closed tagged union (light, thermostat, camera,
//!   door, window, fan) with a common attribute API and bounds enforcement
//! - Define **Rooms** (display groupings keyed by label)
//! - Define **Rules** as plain data (conditions → actions) plus the built-in presets
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod device;
pub mod room;
