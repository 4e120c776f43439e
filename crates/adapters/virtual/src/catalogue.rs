//! The fixed demo home: 19 devices across five rooms, all switched off.

use homesim_domain::device::{Attribute, AttributeValue, DeviceKind};

pub(crate) struct Seed {
    pub name: &'static str,
    pub room: &'static str,
    pub kind: DeviceKind,
    pub attributes: &'static [(Attribute, AttributeValue)],
}

const fn light(name: &'static str, room: &'static str, attributes: &'static [(Attribute, AttributeValue)]) -> Seed {
    Seed {
        name,
        room,
        kind: DeviceKind::Light,
        attributes,
    }
}

const fn plain(name: &'static str, room: &'static str, kind: DeviceKind) -> Seed {
    Seed {
        name,
        room,
        kind,
        attributes: &[],
    }
}

const NEUTRAL: &[(Attribute, AttributeValue)] = &[(Attribute::ColorTemperature, AttributeValue::Int(4000))];
const WARM: &[(Attribute, AttributeValue)] = &[(Attribute::ColorTemperature, AttributeValue::Int(3000))];
const SOFT: &[(Attribute, AttributeValue)] = &[(Attribute::ColorTemperature, AttributeValue::Int(4500))];
const COOL: &[(Attribute, AttributeValue)] = &[(Attribute::ColorTemperature, AttributeValue::Int(5000))];

/// Seed order is creation order, which fixes room order on the dashboard.
pub(crate) const CATALOGUE: &[Seed] = &[
    light("Living Room Light", "Living Room", NEUTRAL),
    light("Living Room Lamp", "Living Room", WARM),
    plain("Living Room Thermostat", "Living Room", DeviceKind::Thermostat),
    plain("Living Room Window", "Living Room", DeviceKind::Window),
    plain("Living Room Fan", "Living Room", DeviceKind::Fan),
    light("Kitchen Light", "Kitchen", COOL),
    light("Kitchen Counter Light", "Kitchen", SOFT),
    plain("Kitchen Thermostat", "Kitchen", DeviceKind::Thermostat),
    plain("Kitchen Window", "Kitchen", DeviceKind::Window),
    light("Bedroom Light", "Bedroom", WARM),
    // warmest supported tone
    light("Bedroom Lamp", "Bedroom", WARM),
    plain("Bedroom Thermostat", "Bedroom", DeviceKind::Thermostat),
    plain("Bedroom Window", "Bedroom", DeviceKind::Window),
    plain("Bedroom Fan", "Bedroom", DeviceKind::Fan),
    light("Bathroom Light", "Bathroom", NEUTRAL),
    plain("Bathroom Window", "Bathroom", DeviceKind::Window),
    light("Entrance Light", "Entrance", NEUTRAL),
    plain("Front Door Camera", "Entrance", DeviceKind::Camera),
    plain("Front Door", "Entrance", DeviceKind::Door),
];
