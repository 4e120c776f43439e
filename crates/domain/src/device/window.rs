//! Motorised window with blinds.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, check_int};
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

pub const PERCENT_RANGE: (i64, i64) = (0, 100);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// How far the window is open, percent.
    pub open_percentage: i64,
    /// How far the blinds are drawn, percent (100 = fully closed).
    pub blinds_percentage: i64,
}

impl Window {
    /// Outside light reaching the room, percent.
    #[must_use]
    pub fn light_level(&self) -> i64 {
        self.open_percentage * (100 - self.blinds_percentage) / 100
    }

    #[must_use]
    pub fn blinds_open(&self) -> bool {
        self.blinds_percentage < 100
    }

    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::OpenPercentage => Some(self.open_percentage.into()),
            Attribute::BlindsPercentage => Some(self.blinds_percentage.into()),
            Attribute::BlindsOpen => Some(self.blinds_open().into()),
            Attribute::LightLevel => Some(self.light_level().into()),
            _ => None,
        }
    }

    /// Opening drives power: an open window is "on".
    pub(super) fn set(
        &mut self,
        power: &mut bool,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> Result<(), HomeError> {
        let (min, max) = PERCENT_RANGE;
        match attribute {
            Attribute::OpenPercentage => {
                let open = check_int(attribute, value.as_int(attribute)?, min, max)?;
                self.open_percentage = open;
                *power = open > 0;
            }
            Attribute::BlindsPercentage => {
                self.blinds_percentage = check_int(attribute, value.as_int(attribute)?, min, max)?;
            }
            Attribute::BlindsOpen => {
                self.blinds_percentage = if value.as_bool(attribute)? { min } else { max };
            }
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Window,
                    attribute,
                }
                .into());
            }
        }
        Ok(())
    }

    pub(super) fn summary(&self, power: bool) -> String {
        if power {
            format!(
                "{}% Open - Blinds: {}% - Light: {}%",
                self.open_percentage,
                self.blinds_percentage,
                self.light_level()
            )
        } else {
            "CLOSED".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_light_level_from_opening_and_blinds() {
        let window = Window {
            open_percentage: 80,
            blinds_percentage: 25,
        };
        assert_eq!(window.light_level(), 60);
    }

    #[test]
    fn should_power_with_opening() {
        let mut window = Window::default();
        let mut power = false;
        window
            .set(&mut power, Attribute::OpenPercentage, &AttributeValue::Int(30))
            .unwrap();
        assert!(power);
        window
            .set(&mut power, Attribute::OpenPercentage, &AttributeValue::Int(0))
            .unwrap();
        assert!(!power);
        assert_eq!(window.summary(power), "CLOSED");
    }

    #[test]
    fn should_map_blinds_open_flag_to_percentage() {
        let mut window = Window::default();
        let mut power = false;
        window
            .set(&mut power, Attribute::BlindsOpen, &AttributeValue::Bool(false))
            .unwrap();
        assert_eq!(window.blinds_percentage, 100);
        assert_eq!(window.get(Attribute::BlindsOpen), Some(AttributeValue::Bool(false)));
    }

    #[test]
    fn should_reject_negative_opening() {
        let mut window = Window::default();
        let mut power = false;
        assert!(
            window
                .set(&mut power, Attribute::OpenPercentage, &AttributeValue::Int(-5))
                .is_err()
        );
        assert_eq!(window.open_percentage, 0);
    }
}
