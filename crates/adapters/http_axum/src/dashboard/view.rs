//! Flat view models the templates render.

use homesim_domain::automation::Rule;
use homesim_domain::device::{Attribute, AttributeValue, Device, ThermostatMode, ValueKind};
use homesim_domain::room::Room;
use homesim_domain::time::{Timestamp, ago};

pub struct RoomView {
    pub name: String,
    pub devices: Vec<DeviceView>,
}

impl RoomView {
    pub fn new(room: &Room, devices: &[&Device]) -> Self {
        Self {
            name: room.to_string(),
            devices: devices.iter().copied().map(DeviceView::new).collect(),
        }
    }
}

pub struct DeviceView {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub powered: bool,
    pub summary: String,
    pub status_colour: &'static str,
    pub accent_colour: &'static str,
    pub controls: Vec<ControlView>,
    pub readings: Vec<ReadingView>,
}

impl DeviceView {
    fn new(device: &Device) -> Self {
        let mut controls = Vec::new();
        let mut readings = Vec::new();
        for (attribute, value) in device.attributes() {
            if attribute == Attribute::Power {
                continue;
            }
            if attribute.is_read_only() {
                readings.push(ReadingView {
                    label: attribute.label(),
                    value: value.to_string(),
                });
            } else {
                controls.push(ControlView::new(attribute, &value));
            }
        }
        Self {
            id: device.id().to_string(),
            name: device.name().to_string(),
            kind: device.kind().as_str(),
            powered: device.power(),
            summary: device.summary(),
            status_colour: device.status_colour(),
            accent_colour: device.accent_colour(),
            controls,
            readings,
        }
    }
}

pub struct ReadingView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Widget {
    Toggle,
    Number,
    Select,
}

pub struct OptionView {
    pub value: &'static str,
    pub selected: bool,
}

pub struct ControlView {
    pub attribute: &'static str,
    pub label: &'static str,
    pub value: String,
    pub min: String,
    pub max: String,
    pub step: &'static str,
    pub options: Vec<OptionView>,
    widget: Widget,
}

impl ControlView {
    fn new(attribute: Attribute, value: &AttributeValue) -> Self {
        let value = value.to_string();
        let (min, max) = attribute
            .bounds()
            .map(|(min, max)| (min.to_string(), max.to_string()))
            .unwrap_or_default();
        let step = match attribute {
            Attribute::ColorTemperature => "100",
            Attribute::TargetTemperature => "0.5",
            _ => "1",
        };
        let (widget, options) = match attribute.value_kind() {
            ValueKind::Bool => (Widget::Toggle, Vec::new()),
            ValueKind::Int | ValueKind::Float => (Widget::Number, Vec::new()),
            ValueKind::Text => (
                Widget::Select,
                ThermostatMode::ALL
                    .into_iter()
                    .map(|mode| OptionView {
                        value: mode.as_str(),
                        selected: mode.as_str() == value,
                    })
                    .collect(),
            ),
        };
        Self {
            attribute: attribute.name(),
            label: attribute.label(),
            value,
            min,
            max,
            step,
            options,
            widget,
        }
    }

    pub fn is_toggle(&self) -> bool {
        self.widget == Widget::Toggle
    }

    pub fn is_number(&self) -> bool {
        self.widget == Widget::Number
    }

    pub fn is_select(&self) -> bool {
        self.widget == Widget::Select
    }

    pub fn is_on(&self) -> bool {
        self.value == "true"
    }

    /// Value a toggle button submits.
    pub fn flipped(&self) -> &'static str {
        if self.is_on() { "false" } else { "true" }
    }
}

pub struct RuleView {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub description: String,
    pub last_triggered: String,
    pub trigger_count: u64,
}

impl RuleView {
    pub fn new(rule: &Rule, now: Timestamp) -> Self {
        let when = if rule.conditions().is_empty() {
            "always".to_string()
        } else {
            join(rule.conditions(), " and ")
        };
        Self {
            id: rule.id().to_string(),
            name: rule.name().to_string(),
            enabled: rule.is_enabled(),
            description: format!("when {when}: {}", join(rule.actions(), ", ")),
            last_triggered: rule
                .last_triggered()
                .map_or_else(|| "never".to_string(), |at| ago(at, now)),
            trigger_count: rule.trigger_count(),
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
