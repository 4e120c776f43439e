//! Thermostat with a target temperature, operating mode, and a simulated
//! room temperature that drifts toward the target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, check_float};
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

pub const TARGET_TEMPERATURE_RANGE: (f64, f64) = (10.0, 32.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    #[default]
    Heat,
    Cool,
    Auto,
    Off,
}

impl ThermostatMode {
    pub const ALL: [Self; 4] = [Self::Heat, Self::Cool, Self::Auto, Self::Off];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Auto => "auto",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidMode(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thermostat {
    /// °C, 10–32.
    pub target_temperature: f64,
    /// Simulated room temperature, °C.
    pub current_temperature: f64,
    pub mode: ThermostatMode,
    /// Relative humidity, percent.
    pub humidity: i64,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self {
            target_temperature: 20.0,
            current_temperature: 20.0,
            mode: ThermostatMode::Heat,
            humidity: 50,
        }
    }
}

impl Thermostat {
    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::TargetTemperature => Some(self.target_temperature.into()),
            Attribute::CurrentTemperature => Some(self.current_temperature.into()),
            Attribute::Mode => Some(self.mode.as_str().into()),
            Attribute::Humidity => Some(self.humidity.into()),
            _ => None,
        }
    }

    /// Setting a target switches the thermostat on.
    pub(super) fn set(
        &mut self,
        power: &mut bool,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> Result<(), HomeError> {
        match attribute {
            Attribute::TargetTemperature => {
                let (min, max) = TARGET_TEMPERATURE_RANGE;
                self.target_temperature =
                    check_float(attribute, value.as_float(attribute)?, min, max)?;
                *power = true;
            }
            Attribute::Mode => {
                self.mode = value.as_text(attribute)?.parse()?;
            }
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Thermostat,
                    attribute,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Move the room temperature one `step` toward the target without
    /// overshooting. Returns whether anything changed.
    pub(super) fn drift(&mut self, step: f64) -> bool {
        let gap = self.target_temperature - self.current_temperature;
        if gap.abs() < 1e-9 {
            return false;
        }
        if gap.abs() <= step {
            self.current_temperature = self.target_temperature;
        } else {
            self.current_temperature += step.copysign(gap);
        }
        true
    }

    pub(super) fn summary(&self, power: bool) -> String {
        if power {
            format!(
                "{:.1}°C → {:.1}°C - Mode: {}",
                self.current_temperature, self.target_temperature, self.mode
            )
        } else {
            "OFF".to_string()
        }
    }

    /// Colour band for the current room temperature.
    pub(super) fn accent(&self) -> &'static str {
        match self.current_temperature {
            t if t < 16.0 => "#81D4FA",
            t if t < 19.0 => "#B3E5FC",
            t if t < 23.0 => "#E1F5FE",
            t if t < 26.0 => "#FFE0B2",
            _ => "#FFCCBC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_power_on_when_target_set() {
        let mut thermostat = Thermostat::default();
        let mut power = false;
        thermostat
            .set(&mut power, Attribute::TargetTemperature, &AttributeValue::Float(22.5))
            .unwrap();
        assert!(power);
        assert!((thermostat.target_temperature - 22.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_target_outside_range() {
        let mut thermostat = Thermostat::default();
        let mut power = false;
        let result =
            thermostat.set(&mut power, Attribute::TargetTemperature, &AttributeValue::Int(40));
        assert!(matches!(result, Err(HomeError::OutOfRange(_))));
        assert!(!power);
        assert!((thermostat.target_temperature - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_parse_mode_case_insensitively() {
        let mut thermostat = Thermostat::default();
        let mut power = false;
        thermostat
            .set(&mut power, Attribute::Mode, &AttributeValue::from("Cool"))
            .unwrap();
        assert_eq!(thermostat.mode, ThermostatMode::Cool);
    }

    #[test]
    fn should_reject_unknown_mode() {
        let mut thermostat = Thermostat::default();
        let mut power = false;
        let result = thermostat.set(&mut power, Attribute::Mode, &AttributeValue::from("turbo"));
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::InvalidMode(_)))
        ));
        assert_eq!(thermostat.mode, ThermostatMode::Heat);
    }

    #[test]
    fn should_drift_by_half_degree_without_overshooting() {
        let mut thermostat = Thermostat {
            target_temperature: 21.2,
            ..Thermostat::default()
        };
        assert!(thermostat.drift(0.5));
        assert!((thermostat.current_temperature - 20.5).abs() < 1e-9);
        assert!(thermostat.drift(0.5));
        assert!(thermostat.drift(0.5));
        assert!((thermostat.current_temperature - 21.2).abs() < 1e-9);
        assert!(!thermostat.drift(0.5));
    }

    #[test]
    fn should_band_colour_by_temperature() {
        let cold = Thermostat {
            current_temperature: 12.0,
            ..Thermostat::default()
        };
        let hot = Thermostat {
            current_temperature: 28.0,
            ..Thermostat::default()
        };
        assert_eq!(cold.accent(), "#81D4FA");
        assert_eq!(hot.accent(), "#FFCCBC");
    }
}
