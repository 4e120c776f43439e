//! The built-in rule set registered at startup.

use super::{Action, Condition, Rule};
use crate::device::{Attribute, DeviceKind};
use crate::error::HomeError;

/// Tunables for the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetConfig {
    pub comfort_temperature: f64,
    pub morning_hour: u32,
    pub evening_hour: u32,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            comfort_temperature: 22.0,
            morning_hour: 7,
            evening_hour: 19,
        }
    }
}

/// Every built-in rule, in registration order.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] when an hour is outside 0–23.
pub fn builtin(config: PresetConfig) -> Result<Vec<Rule>, HomeError> {
    Ok(vec![
        motion_lighting()?,
        temperature_control(config.comfort_temperature)?,
        auto_lock()?,
        energy_saving()?,
        morning_routine(config.morning_hour)?,
        evening_routine(config.evening_hour)?,
    ])
}

/// Any motion turns every light on at full brightness.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] if the rule is malformed.
pub fn motion_lighting() -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Motion Lighting")
        .condition(Condition::AnyMotion)
        .action(Action::set_all(DeviceKind::Light, Attribute::Power, true))
        .action(Action::set_all(DeviceKind::Light, Attribute::Brightness, 100))
        .build()
}

/// Pull powered thermostats back to `target` once the room drifts a degree away.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] if the rule is malformed.
pub fn temperature_control(target: f64) -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Temperature Control")
        .condition(Condition::TemperatureOffTarget {
            target,
            tolerance: 1.0,
        })
        .action(Action::set_powered(
            DeviceKind::Thermostat,
            Attribute::TargetTemperature,
            target,
        ))
        .build()
}

/// Lock powered doors when no camera sees anyone.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] if the rule is malformed.
pub fn auto_lock() -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Auto Lock")
        .condition(Condition::NoMotion)
        .action(Action::set_powered(DeviceKind::Door, Attribute::Locked, true))
        .build()
}

/// Switch off lights and fans that are running while the house is empty.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] if the rule is malformed.
pub fn energy_saving() -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Energy Saving")
        .condition(Condition::NoMotion)
        .action(Action::set_powered(DeviceKind::Light, Attribute::Brightness, 0))
        .action(Action::set_powered(DeviceKind::Fan, Attribute::Speed, 0))
        .build()
}

/// Bright, cool light and a warm house at `hour`.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] when `hour` is past 23.
pub fn morning_routine(hour: u32) -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Morning Routine")
        .condition(Condition::HourIs { hour })
        .action(Action::set_all(DeviceKind::Light, Attribute::Brightness, 70))
        .action(Action::set_all(DeviceKind::Light, Attribute::ColorTemperature, 5000))
        .action(Action::set_all(DeviceKind::Thermostat, Attribute::TargetTemperature, 22.0))
        .action(Action::set_all(DeviceKind::Window, Attribute::BlindsPercentage, 30))
        .build()
}

/// Dim, warm light and closed blinds at `hour`.
///
/// # Errors
///
/// Returns [`HomeError::Validation`] when `hour` is past 23.
pub fn evening_routine(hour: u32) -> Result<Rule, HomeError> {
    Rule::builder()
        .name("Evening Routine")
        .condition(Condition::HourIs { hour })
        .action(Action::set_all(DeviceKind::Light, Attribute::Brightness, 50))
        .action(Action::set_all(DeviceKind::Light, Attribute::ColorTemperature, 3000))
        .action(Action::set_all(DeviceKind::Thermostat, Attribute::TargetTemperature, 21.0))
        .action(Action::set_all(DeviceKind::Window, Attribute::BlindsPercentage, 100))
        .build()
}
