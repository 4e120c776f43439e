//! Common error types used across the workspace.
//!
//! Each failure has a narrow, typed error that converts into [`HomeError`]
//! via `#[from]`. There are no `String` catch-all variants.

use crate::device::{Attribute, DeviceKind, ValueKind};
use crate::id::DeviceId;

/// Top-level error for every registry and rule operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    #[error(transparent)]
    UnknownDevice(#[from] UnknownDeviceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// A numeric value fell outside the attribute's declared bounds.
///
/// The mutation is rejected and the device keeps its previous value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{attribute} must be between {min} and {max}, got {value}")]
pub struct OutOfRangeError {
    pub attribute: Attribute,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// The device id does not belong to the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device {id}")]
pub struct UnknownDeviceError {
    pub id: DeviceId,
}

/// A non-device lookup failed (rules, rooms).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Domain invariant violations other than numeric bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("room must not be empty")]
    EmptyRoom,

    #[error("a rule needs at least one action")]
    NoActions,

    #[error("a rule named {0:?} already exists")]
    DuplicateRuleName(String),

    #[error("{kind} devices have no {attribute} attribute")]
    UnsupportedAttribute {
        kind: DeviceKind,
        attribute: Attribute,
    },

    #[error("{0} is read-only")]
    ReadOnly(Attribute),

    #[error("{attribute} expects a {expected} value")]
    TypeMismatch {
        attribute: Attribute,
        expected: ValueKind,
    },

    #[error("unknown thermostat mode {0:?}")]
    InvalidMode(String),

    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    #[error("cannot read {input:?} as a value for {attribute}")]
    InvalidValue { attribute: Attribute, input: String },

    #[error("hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),

    #[error("cannot open the door while it is locked")]
    DoorLocked,

    #[error("{0} needs the device to be switched on")]
    PoweredOff(Attribute),
}
