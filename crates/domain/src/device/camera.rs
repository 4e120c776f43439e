//! Security camera with motion detection and recording.

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::attribute_value::AttributeValue;
use super::DeviceKind;
use crate::error::{HomeError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub recording: bool,
    pub motion_detected: bool,
    /// Percent; not simulated, the camera stays charged.
    pub battery_level: i64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            recording: false,
            motion_detected: false,
            battery_level: 100,
        }
    }
}

impl Camera {
    pub(super) fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Recording => Some(self.recording.into()),
            Attribute::MotionDetected => Some(self.motion_detected.into()),
            Attribute::BatteryLevel => Some(self.battery_level.into()),
            _ => None,
        }
    }

    /// Recording can only start while the camera is on.
    pub(super) fn set(
        &mut self,
        power: bool,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> Result<(), HomeError> {
        match attribute {
            Attribute::Recording => {
                let recording = value.as_bool(attribute)?;
                if recording && !power {
                    return Err(ValidationError::PoweredOff(attribute).into());
                }
                self.recording = recording;
            }
            Attribute::MotionDetected => self.motion_detected = value.as_bool(attribute)?,
            _ => {
                return Err(ValidationError::UnsupportedAttribute {
                    kind: DeviceKind::Camera,
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
        let motion = if self.motion_detected {
            "Motion Detected!"
        } else {
            "No Motion"
        };
        let recording = if self.recording { "Recording" } else { "Standby" };
        format!("{motion} - {recording} - Battery: {}%", self.battery_level)
    }

    pub(super) fn accent(&self) -> &'static str {
        if self.motion_detected {
            "#FFC107"
        } else {
            "#9E9E9E"
        }
    }
}
