//! Smart door with an independent lock and open/closed sensor.

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub locked: bool,
    pub open: bool,
}

impl Default for Door {
    fn default() -> Self {
        Self {
            locked: true,
            open: false,
        }
    }
}

impl Door {
    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Locked => Some(self.locked.into()),
            Attribute::Open => Some(self.open.into()),
            _ => None,
        }
    }

    pub(super) fn set(&mut self, attribute: Attribute, value: &AttributeValue) -> Result<(), HomeError> {
        match attribute {
            Attribute::Locked => self.locked = value.as_bool(attribute)?,
            Attribute::Open => {
                let open = value.as_bool(attribute)?;
                if open && self.locked {
                    return Err(ValidationError::DoorLocked.into());
                }
                self.open = open;
            }
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Door,
                    attribute,
                }
                .into());
            }
        }
        Ok(())
    }

    pub(super) fn summary(&self, power: bool) -> String {
        if !power {
            return "OFF".to_string();
        }
        let door = if self.open { "Open" } else { "Closed" };
        let lock = if self.locked { "Locked" } else { "Unlocked" };
        format!("{door} - {lock}")
    }

    pub(super) fn accent(&self) -> &'static str {
        if self.locked { "#4CAF50" } else { "#F44336" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_locked_and_closed() {
        let door = Door::default();
        assert!(door.locked);
        assert!(!door.open);
        assert_eq!(door.summary(true), "Closed - Locked");
    }

    #[test]
    fn should_unlock() {
        let mut door = Door::default();
        door.set(Attribute::Locked, &AttributeValue::Bool(false)).unwrap();
        assert!(!door.locked);
        assert_eq!(door.accent(), "#F44336");
    }

    #[test]
    fn should_refuse_to_open_while_locked() {
        let mut door = Door::default();
        let result = door.set(Attribute::Open, &AttributeValue::Bool(true));
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::DoorLocked))
        ));
        assert!(!door.open);

        door.set(Attribute::Locked, &AttributeValue::Bool(false)).unwrap();
        door.set(Attribute::Open, &AttributeValue::Bool(true)).unwrap();
        assert!(door.open);
        assert_eq!(door.summary(true), "Open - Unlocked");
    }

    #[test]
    fn should_refuse_brightness() {
        let mut door = Door::default();
        let result = door.set(Attribute::Brightness, &AttributeValue::Int(10));
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::UnsupportedAttribute {
                kind: DeviceKind::Door,
                ..
            }))
        ));
    }
}
