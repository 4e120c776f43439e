//! Condition — a predicate over device state that gates a rule.

use serde::{Deserialize, Serialize};

use crate::device::{Attribute, AttributeValue};
use crate::id::DeviceId;

/// A predicate that must hold for a rule's actions to execute.
///
/// All conditions of a rule must be satisfied (logical AND). Evaluation is
/// pure: it reads device state and the clock, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// A specific device's attribute currently equals `value`.
    AttributeEquals {
        device: DeviceId,
        attribute: Attribute,
        value: AttributeValue,
    },
    /// Some powered camera reports motion.
    AnyMotion,
    /// At least one powered camera exists and none reports motion.
    NoMotion,
    /// Some powered thermostat's room temperature is more than `tolerance`
    /// away from `target`.
    TemperatureOffTarget { target: f64, tolerance: f64 },
    /// The local wall-clock hour equals `hour` (0–23).
    HourIs { hour: u32 },
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttributeEquals {
                device,
                attribute,
                value,
            } => write!(f, "{device}.{attribute} == {value}"),
            Self::AnyMotion => f.write_str("motion detected"),
            Self::NoMotion => f.write_str("no motion"),
            Self::TemperatureOffTarget { target, tolerance } => {
                write!(f, "temperature off {target}°C by more than {tolerance}")
            }
            Self::HourIs { hour } => write!(f, "hour is {hour:02}"),
        }
    }
}
