//! Attribute names, their value kinds, and bounds checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OutOfRangeError, ValidationError};

/// Every attribute any device kind can expose.
///
/// Which attributes a particular device supports depends on its
/// [`DeviceKind`](super::DeviceKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Power,
    Brightness,
    ColorTemperature,
    TargetTemperature,
    CurrentTemperature,
    Mode,
    Humidity,
    Recording,
    MotionDetected,
    BatteryLevel,
    Locked,
    Open,
    OpenPercentage,
    BlindsPercentage,
    BlindsOpen,
    LightLevel,
    Speed,
    Oscillating,
    TimerMinutes,
}

/// The shape of value an attribute accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Text => "text",
        })
    }
}

impl Attribute {
    const ALL: [Self; 19] = [
        Self::Power,
        Self::Brightness,
        Self::ColorTemperature,
        Self::TargetTemperature,
        Self::CurrentTemperature,
        Self::Mode,
        Self::Humidity,
        Self::Recording,
        Self::MotionDetected,
        Self::BatteryLevel,
        Self::Locked,
        Self::Open,
        Self::OpenPercentage,
        Self::BlindsPercentage,
        Self::BlindsOpen,
        Self::LightLevel,
        Self::Speed,
        Self::Oscillating,
        Self::TimerMinutes,
    ];

    /// Wire/form name, e.g. `"color_temperature"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Brightness => "brightness",
            Self::ColorTemperature => "color_temperature",
            Self::TargetTemperature => "target_temperature",
            Self::CurrentTemperature => "current_temperature",
            Self::Mode => "mode",
            Self::Humidity => "humidity",
            Self::Recording => "recording",
            Self::MotionDetected => "motion_detected",
            Self::BatteryLevel => "battery_level",
            Self::Locked => "locked",
            Self::Open => "open",
            Self::OpenPercentage => "open_percentage",
            Self::BlindsPercentage => "blinds_percentage",
            Self::BlindsOpen => "blinds_open",
            Self::LightLevel => "light_level",
            Self::Speed => "speed",
            Self::Oscillating => "oscillating",
            Self::TimerMinutes => "timer_minutes",
        }
    }

    /// Human label for the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Brightness => "Brightness",
            Self::ColorTemperature => "Colour temperature",
            Self::TargetTemperature => "Target temperature",
            Self::CurrentTemperature => "Current temperature",
            Self::Mode => "Mode",
            Self::Humidity => "Humidity",
            Self::Recording => "Recording",
            Self::MotionDetected => "Motion",
            Self::BatteryLevel => "Battery",
            Self::Locked => "Lock",
            Self::Open => "Door",
            Self::OpenPercentage => "Window opening",
            Self::BlindsPercentage => "Blinds closed",
            Self::BlindsOpen => "Blinds",
            Self::LightLevel => "Light level",
            Self::Speed => "Speed",
            Self::Oscillating => "Oscillation",
            Self::TimerMinutes => "Timer (min)",
        }
    }

    /// The value kind [`set_attribute`](super::Device::set) expects.
    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Power
            | Self::Recording
            | Self::MotionDetected
            | Self::Locked
            | Self::Open
            | Self::BlindsOpen
            | Self::Oscillating => ValueKind::Bool,
            Self::TargetTemperature | Self::CurrentTemperature => ValueKind::Float,
            Self::Mode => ValueKind::Text,
            Self::Brightness
            | Self::ColorTemperature
            | Self::Humidity
            | Self::BatteryLevel
            | Self::OpenPercentage
            | Self::BlindsPercentage
            | Self::LightLevel
            | Self::Speed
            | Self::TimerMinutes => ValueKind::Int,
        }
    }

    /// Whether the attribute is derived or simulated rather than settable.
    #[must_use]
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::CurrentTemperature | Self::Humidity | Self::BatteryLevel | Self::LightLevel
        )
    }

    /// Inclusive bounds of a settable numeric attribute.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(self) -> Option<(f64, f64)> {
        let int = |(min, max): (i64, i64)| Some((min as f64, max as f64));
        match self {
            Self::Brightness => int(super::light::BRIGHTNESS_RANGE),
            Self::ColorTemperature => int(super::light::COLOR_TEMPERATURE_RANGE),
            Self::TargetTemperature => Some(super::thermostat::TARGET_TEMPERATURE_RANGE),
            Self::OpenPercentage | Self::BlindsPercentage => int(super::window::PERCENT_RANGE),
            Self::Speed => int(super::fan::SPEED_RANGE),
            Self::TimerMinutes => int(super::fan::TIMER_RANGE),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == wanted)
            .ok_or_else(|| ValidationError::UnknownAttribute(s.to_string()))
    }
}

/// Reject `value` unless it lies in `min..=max`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn check_int(
    attribute: Attribute,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64, OutOfRangeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OutOfRangeError {
            attribute,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        })
    }
}

/// Reject `value` unless it lies in `min..=max`. `NaN` is always rejected.
pub(crate) fn check_float(
    attribute: Attribute,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, OutOfRangeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OutOfRangeError {
            attribute,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_attribute_from_its_name() {
        for attr in Attribute::ALL {
            assert_eq!(attr.name().parse::<Attribute>().unwrap(), attr);
        }
    }

    #[test]
    fn should_reject_unknown_attribute_name() {
        let result = "colour".parse::<Attribute>();
        assert_eq!(
            result,
            Err(ValidationError::UnknownAttribute("colour".to_string()))
        );
    }

    #[test]
    fn should_match_serde_name_with_display_name() {
        let json = serde_json::to_string(&Attribute::ColorTemperature).unwrap();
        assert_eq!(json, "\"color_temperature\"");
    }

    #[test]
    fn should_flag_simulated_attributes_as_read_only() {
        assert!(Attribute::CurrentTemperature.is_read_only());
        assert!(Attribute::LightLevel.is_read_only());
        assert!(!Attribute::Brightness.is_read_only());
    }

    #[test]
    fn should_accept_inclusive_bounds() {
        assert_eq!(check_int(Attribute::Speed, 0, 0, 3), Ok(0));
        assert_eq!(check_int(Attribute::Speed, 3, 0, 3), Ok(3));
        assert!(check_int(Attribute::Speed, 4, 0, 3).is_err());
        assert!(check_int(Attribute::Speed, -1, 0, 3).is_err());
    }

    #[test]
    fn should_expose_bounds_for_settable_numbers_only() {
        assert_eq!(Attribute::Speed.bounds(), Some((0.0, 3.0)));
        assert_eq!(Attribute::TargetTemperature.bounds(), Some((10.0, 32.0)));
        assert_eq!(Attribute::Humidity.bounds(), None);
        assert_eq!(Attribute::Locked.bounds(), None);
    }

    #[test]
    fn should_reject_nan_temperature() {
        assert!(check_float(Attribute::TargetTemperature, f64::NAN, 10.0, 32.0).is_err());
    }
}
