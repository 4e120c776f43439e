//! Device — a simulated IoT endpoint with a fixed attribute schema per kind.
//!
//! The catalogue is closed, so device kinds form a tagged union
//! ([`DeviceState`]) rather than an open trait hierarchy. Every device shares
//! a name, a room, a power flag and a `last_changed` stamp; the rest of its
//! state lives in the kind-specific record.
//!
//! All writes go through [`Device::set`], which enforces each attribute's
//! type and bounds. A rejected write leaves the device untouched.

mod attribute;
mod attribute_value;
mod camera;
mod door;
mod fan;
mod light;
mod thermostat;
mod window;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use attribute::{Attribute, ValueKind};
pub use attribute_value::AttributeValue;
pub use camera::Camera;
pub use door::Door;
pub use fan::Fan;
pub use light::Light;
pub use thermostat::{Thermostat, ThermostatMode};
pub use window::Window;

use crate::error::{HomeError, ValidationError};
use crate::id::DeviceId;
use crate::room::Room;
use crate::time::{Timestamp, now};

const STATUS_ON: &str = "#4CAF50";
const STATUS_OFF: &str = "#F44336";
const NEUTRAL: &str = "#CCCCCC";

/// The closed set of device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Light,
    Thermostat,
    Camera,
    Door,
    Window,
    Fan,
}

impl DeviceKind {
    pub const ALL: [Self; 6] = [
        Self::Light,
        Self::Thermostat,
        Self::Camera,
        Self::Door,
        Self::Window,
        Self::Fan,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Camera => "camera",
            Self::Door => "door",
            Self::Window => "window",
            Self::Fan => "fan",
        }
    }

    /// Attributes this kind exposes, in display order. `power` is always first.
    #[must_use]
    pub fn attributes(self) -> &'static [Attribute] {
        match self {
            Self::Light => &[Attribute::Power, Attribute::Brightness, Attribute::ColorTemperature],
            Self::Thermostat => &[
                Attribute::Power,
                Attribute::TargetTemperature,
                Attribute::Mode,
                Attribute::CurrentTemperature,
                Attribute::Humidity,
            ],
            Self::Camera => &[
                Attribute::Power,
                Attribute::Recording,
                Attribute::MotionDetected,
                Attribute::BatteryLevel,
            ],
            Self::Door => &[Attribute::Power, Attribute::Locked, Attribute::Open],
            Self::Window => &[
                Attribute::Power,
                Attribute::OpenPercentage,
                Attribute::BlindsPercentage,
                Attribute::BlindsOpen,
                Attribute::LightLevel,
            ],
            Self::Fan => &[
                Attribute::Power,
                Attribute::Speed,
                Attribute::Oscillating,
                Attribute::TimerMinutes,
            ],
        }
    }

    #[must_use]
    pub fn supports(self, attribute: Attribute) -> bool {
        self.attributes().contains(&attribute)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific state of a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceState {
    Light(Light),
    Thermostat(Thermostat),
    Camera(Camera),
    Door(Door),
    Window(Window),
    Fan(Fan),
}

impl DeviceState {
    /// Factory-default state for `kind`.
    #[must_use]
    pub fn default_for(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Light => Self::Light(Light::default()),
            DeviceKind::Thermostat => Self::Thermostat(Thermostat::default()),
            DeviceKind::Camera => Self::Camera(Camera::default()),
            DeviceKind::Door => Self::Door(Door::default()),
            DeviceKind::Window => Self::Window(Window::default()),
            DeviceKind::Fan => Self::Fan(Fan::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::Thermostat(_) => DeviceKind::Thermostat,
            Self::Camera(_) => DeviceKind::Camera,
            Self::Door(_) => DeviceKind::Door,
            Self::Window(_) => DeviceKind::Window,
            Self::Fan(_) => DeviceKind::Fan,
        }
    }
}

/// A simulated device owned by the registry.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    id: DeviceId,
    name: String,
    room: Room,
    power: bool,
    state: DeviceState,
    last_changed: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn room(&self) -> &Room {
        &self.room
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.state.kind()
    }

    #[must_use]
    pub fn power(&self) -> bool {
        self.power
    }

    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    #[must_use]
    pub fn last_changed(&self) -> Timestamp {
        self.last_changed
    }

    /// Read an attribute. Returns `None` when this kind does not have it.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match (attribute, &self.state) {
            (Attribute::Power, _) => Some(self.power.into()),
            (_, DeviceState::Light(s)) => s.get(attribute),
            (_, DeviceState::Thermostat(s)) => s.get(attribute),
            (_, DeviceState::Camera(s)) => s.get(attribute),
            (_, DeviceState::Door(s)) => s.get(attribute),
            (_, DeviceState::Window(s)) => s.get(attribute),
            (_, DeviceState::Fan(s)) => s.get(attribute),
        }
    }

    /// All readable attributes with their current values, in display order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(Attribute, AttributeValue)> {
        self.kind()
            .attributes()
            .iter()
            .filter_map(|attr| self.get(*attr).map(|value| (*attr, value)))
            .collect()
    }

    /// Write an attribute, stamping `last_changed` on success.
    ///
    /// # Errors
    ///
    /// - [`HomeError::OutOfRange`] when a numeric value violates its bounds
    /// - [`ValidationError::UnsupportedAttribute`] when this kind lacks the attribute
    /// - [`ValidationError::ReadOnly`] for simulated/derived attributes
    /// - [`ValidationError::TypeMismatch`] / [`ValidationError::InvalidMode`] for bad values
    ///
    /// On error the device is left unchanged.
    pub fn set(
        &mut self,
        attribute: Attribute,
        value: &AttributeValue,
        at: Timestamp,
    ) -> Result<(), HomeError> {
        let kind = self.kind();
        if !kind.supports(attribute) {
            return Err(ValidationError::UnsupportedAttribute { kind, attribute }.into());
        }
        if attribute.is_read_only() {
            return Err(ValidationError::ReadOnly(attribute).into());
        }
        match (attribute, &mut self.state) {
            (Attribute::Power, _) => self.power = value.as_bool(attribute)?,
            (_, DeviceState::Light(s)) => s.set(&mut self.power, attribute, value)?,
            (_, DeviceState::Thermostat(s)) => s.set(&mut self.power, attribute, value)?,
            (_, DeviceState::Camera(s)) => s.set(self.power, attribute, value)?,
            (_, DeviceState::Door(s)) => s.set(attribute, value)?,
            (_, DeviceState::Window(s)) => s.set(&mut self.power, attribute, value)?,
            (_, DeviceState::Fan(s)) => s.set(&mut self.power, attribute, value)?,
        }
        self.last_changed = at;
        Ok(())
    }

    /// Flip the power flag, returning the new value.
    pub fn toggle_power(&mut self, at: Timestamp) -> bool {
        self.power = !self.power;
        self.last_changed = at;
        self.power
    }

    /// Advance a powered thermostat's room temperature by `step` °C toward
    /// its target. Returns whether anything changed.
    pub fn drift_temperature(&mut self, step: f64, at: Timestamp) -> bool {
        let changed = match &mut self.state {
            DeviceState::Thermostat(s) if self.power => s.drift(step),
            _ => false,
        };
        if changed {
            self.last_changed = at;
        }
        changed
    }

    /// Count a fan's auto-off timer down by one minute. Returns whether
    /// anything changed.
    pub fn count_down_timer(&mut self, at: Timestamp) -> bool {
        let changed = match &mut self.state {
            DeviceState::Fan(s) => s.countdown(&mut self.power),
            _ => false,
        };
        if changed {
            self.last_changed = at;
        }
        changed
    }

    /// One-line, kind-specific state description.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.state {
            DeviceState::Light(s) => s.summary(self.power),
            DeviceState::Thermostat(s) => s.summary(self.power),
            DeviceState::Camera(s) => s.summary(self.power),
            DeviceState::Door(s) => s.summary(self.power),
            DeviceState::Window(s) => s.summary(self.power),
            DeviceState::Fan(s) => s.summary(self.power),
        }
    }

    /// Green when powered, red otherwise.
    #[must_use]
    pub fn status_colour(&self) -> &'static str {
        if self.power { STATUS_ON } else { STATUS_OFF }
    }

    /// Kind-specific indicator colour (light tone, temperature band, motion, lock).
    #[must_use]
    pub fn accent_colour(&self) -> &'static str {
        match &self.state {
            DeviceState::Light(s) => s.accent(),
            DeviceState::Thermostat(s) => s.accent(),
            DeviceState::Camera(s) => s.accent(),
            DeviceState::Door(s) => s.accent(),
            DeviceState::Window(_) | DeviceState::Fan(_) => NEUTRAL,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.room, self.summary())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    room: Option<String>,
    kind: Option<DeviceKind>,
    initial: Vec<(Attribute, AttributeValue)>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Queue an initial attribute value, applied in order through the
    /// normal bounds checks.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute, value: impl Into<AttributeValue>) -> Self {
        self.initial.push((attribute, value.into()));
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = (Attribute, AttributeValue)>) -> Self {
        self.initial.extend(attributes);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] / [`ValidationError::EmptyRoom`]
    /// for blank labels, or the first error raised by an initial attribute.
    pub fn build(self) -> Result<Device, HomeError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let room = Room::new(self.room.unwrap_or_default())?;
        let created = now();
        let mut device = Device {
            id: self.id.unwrap_or_default(),
            name,
            room,
            power: false,
            state: DeviceState::default_for(self.kind.unwrap_or(DeviceKind::Light)),
            last_changed: created,
        };
        for (attribute, value) in &self.initial {
            device.set(*attribute, value, created)?;
        }
        Ok(device)
    }
}
