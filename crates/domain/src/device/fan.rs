//! Three-speed fan with oscillation and an auto-off timer.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, check_int};
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

pub const SPEED_RANGE: (i64, i64) = (0, 3);
pub const TIMER_RANGE: (i64, i64) = (0, 720);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fan {
    /// 0 = off, 3 = high.
    pub speed: i64,
    pub oscillating: bool,
    /// Minutes until auto-off; 0 disables the timer.
    pub timer_minutes: i64,
}

impl Fan {
    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Speed => Some(self.speed.into()),
            Attribute::Oscillating => Some(self.oscillating.into()),
            Attribute::TimerMinutes => Some(self.timer_minutes.into()),
            _ => None,
        }
    }

    /// Speed drives power: any non-zero speed is "on". Oscillation needs power.
    pub(super) fn set(
        &mut self,
        power: &mut bool,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> Result<(), HomeError> {
        match attribute {
            Attribute::Speed => {
                let (min, max) = SPEED_RANGE;
                let speed = check_int(attribute, value.as_int(attribute)?, min, max)?;
                self.speed = speed;
                *power = speed > 0;
            }
            Attribute::Oscillating => {
                let oscillating = value.as_bool(attribute)?;
                if oscillating && !*power {
                    return Err(ValidationError::PoweredOff(attribute).into());
                }
                self.oscillating = oscillating;
            }
            Attribute::TimerMinutes => {
                let (min, max) = TIMER_RANGE;
                self.timer_minutes = check_int(attribute, value.as_int(attribute)?, min, max)?;
            }
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Fan,
                    attribute,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Count the timer down by one minute. When it reaches zero the fan stops.
    pub(super) fn countdown(&mut self, power: &mut bool) -> bool {
        if self.timer_minutes == 0 {
            return false;
        }
        self.timer_minutes -= 1;
        if self.timer_minutes == 0 {
            self.speed = 0;
            *power = false;
        }
        true
    }

    pub(super) fn summary(&self, power: bool) -> String {
        let speed = match self.speed {
            1 => "Low",
            2 => "Medium",
            3 => "High",
            _ => return "OFF".to_string(),
        };
        if !power {
            return "OFF".to_string();
        }
        let oscillation = if self.oscillating { "Oscillating" } else { "Fixed" };
        if self.timer_minutes > 0 {
            format!("{speed} - {oscillation} - Timer: {}min", self.timer_minutes)
        } else {
            format!("{speed} - {oscillation} - No Timer")
        }
    }
}
