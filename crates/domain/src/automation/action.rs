//! Action — a device mutation performed when a rule fires.

use serde::{Deserialize, Serialize};

use crate::device::{Attribute, AttributeValue, DeviceKind};
use crate::id::DeviceId;

/// A mutation expressed as one or more `set_attribute` calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Set one attribute on one device.
    SetAttribute {
        device: DeviceId,
        attribute: Attribute,
        value: AttributeValue,
    },
    /// Set one attribute on every device of `kind`, in registry order.
    SetAll {
        kind: DeviceKind,
        attribute: Attribute,
        value: AttributeValue,
        /// Skip devices that are switched off.
        #[serde(default)]
        only_powered: bool,
    },
}

impl Action {
    /// Shorthand for [`Action::SetAll`] over every device of `kind`.
    #[must_use]
    pub fn set_all(kind: DeviceKind, attribute: Attribute, value: impl Into<AttributeValue>) -> Self {
        Self::SetAll {
            kind,
            attribute,
            value: value.into(),
            only_powered: false,
        }
    }

    /// Shorthand for [`Action::SetAll`] restricted to powered devices.
    #[must_use]
    pub fn set_powered(
        kind: DeviceKind,
        attribute: Attribute,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self::SetAll {
            kind,
            attribute,
            value: value.into(),
            only_powered: true,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetAttribute {
                device,
                attribute,
                value,
            } => write!(f, "{device}.{attribute} = {value}"),
            Self::SetAll {
                kind,
                attribute,
                value,
                only_powered,
            } => {
                let scope = if *only_powered { "powered " } else { "" };
                write!(f, "{scope}{kind}.{attribute} = {value}")
            }
        }
    }
}
