//! Dimmable light with adjustable colour temperature.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, check_int};
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

pub const BRIGHTNESS_RANGE: (i64, i64) = (0, 100);
pub const COLOR_TEMPERATURE_RANGE: (i64, i64) = (3000, 6000);

/// Swatch per reference colour temperature, warm to daylight.
const SWATCHES: [(i64, &str); 4] = [
    (3000, "#FF9E80"),
    (4000, "#FFECB3"),
    (5000, "#E3F2FD"),
    (6000, "#E1F5FE"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    /// Percent, 0–100.
    pub brightness: i64,
    /// Kelvin, 3000–6000.
    pub color_temperature: i64,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            brightness: 0,
            color_temperature: 4000,
        }
    }
}

impl Light {
    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Brightness => Some(self.brightness.into()),
            Attribute::ColorTemperature => Some(self.color_temperature.into()),
            _ => None,
        }
    }

    /// Brightness drives power: any positive level switches the light on,
    /// zero switches it off.
    pub(super) fn set(
        &mut self,
        power: &mut bool,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> Result<(), HomeError> {
        match attribute {
            Attribute::Brightness => {
                let (min, max) = BRIGHTNESS_RANGE;
                let level = check_int(attribute, value.as_int(attribute)?, min, max)?;
                self.brightness = level;
                *power = level > 0;
            }
            Attribute::ColorTemperature => {
                let (min, max) = COLOR_TEMPERATURE_RANGE;
                self.color_temperature =
                    check_int(attribute, value.as_int(attribute)?, min, max)?;
            }
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Light,
                    attribute,
                }
                .into());
            }
        }
        Ok(())
    }

    pub(super) fn summary(&self, power: bool) -> String {
        if power {
            format!("{}% - {}K", self.brightness, self.color_temperature)
        } else {
            "OFF".to_string()
        }
    }

    /// Swatch of the reference temperature closest to the current one.
    pub(super) fn accent(&self) -> &'static str {
        SWATCHES
            .iter()
            .min_by_key(|(kelvin, _)| (kelvin - self.color_temperature).abs())
            .map_or("#FFECB3", |(_, colour)| colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutOfRangeError;

    #[test]
    fn should_switch_power_with_brightness() {
        let mut light = Light::default();
        let mut power = false;

        light
            .set(&mut power, Attribute::Brightness, &AttributeValue::Int(40))
            .unwrap();
        assert!(power);
        assert_eq!(light.brightness, 40);

        light
            .set(&mut power, Attribute::Brightness, &AttributeValue::Int(0))
            .unwrap();
        assert!(!power);
    }

    #[test]
    fn should_reject_brightness_above_hundred() {
        let mut light = Light {
            brightness: 50,
            ..Light::default()
        };
        let mut power = true;

        let result = light.set(&mut power, Attribute::Brightness, &AttributeValue::Int(120));

        assert!(matches!(
            result,
            Err(HomeError::OutOfRange(OutOfRangeError { attribute: Attribute::Brightness, .. }))
        ));
        assert_eq!(light.brightness, 50);
        assert!(power);
    }

    #[test]
    fn should_reject_colour_temperature_outside_range() {
        let mut light = Light::default();
        let mut power = false;
        assert!(
            light
                .set(&mut power, Attribute::ColorTemperature, &AttributeValue::Int(2700))
                .is_err()
        );
        assert_eq!(light.color_temperature, 4000);
    }

    #[test]
    fn should_pick_nearest_swatch() {
        let light = Light {
            color_temperature: 4600,
            ..Light::default()
        };
        assert_eq!(light.accent(), "#E3F2FD");
    }

    #[test]
    fn should_summarise_as_off_when_unpowered() {
        assert_eq!(Light::default().summary(false), "OFF");
        let light = Light {
            brightness: 70,
            color_temperature: 5000,
        };
        assert_eq!(light.summary(true), "70% - 5000K");
    }
}
