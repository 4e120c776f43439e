//! Automation engine — evaluates rules against the device registry.
//!
//! Rules are visited in registration order. For each enabled rule whose
//! conditions all hold, the actions run in order. A rule that fails is
//! logged and reported, and evaluation moves on to the next rule; mutations
//! it made before failing are kept.

use homesim_domain::automation::{Action, Condition, Rule};
use homesim_domain::device::{Attribute, AttributeValue, DeviceKind, DeviceState};
use homesim_domain::error::{HomeError, NotFoundError, ValidationError};
use homesim_domain::id::{DeviceId, RuleId};
use homesim_domain::time::Timestamp;

use crate::ports::Clock;
use crate::registry::DeviceRegistry;

/// A rule failed while checking a condition or running an action.
#[derive(Debug, thiserror::Error)]
#[error("rule {rule:?} failed: {source}")]
pub struct RuleEvaluationError {
    pub rule: String,
    pub source: HomeError,
}

/// Outcome of one [`AutomationEngine::evaluate_all`] pass.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Rules whose actions all ran, in evaluation order.
    pub triggered: Vec<RuleId>,
    pub failures: Vec<RuleEvaluationError>,
}

impl Evaluation {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owner of the rule set.
pub struct AutomationEngine<C> {
    clock: C,
    rules: Vec<Rule>,
    enabled: bool,
}

impl<C: Clock> AutomationEngine<C> {
    /// Create an engine with no rules and automation switched on.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            rules: Vec::new(),
            enabled: true,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate and append a rule.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] if the rule is invalid or another
    /// rule already uses its name.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name()))]
    pub fn register_rule(&mut self, rule: Rule) -> Result<RuleId, HomeError> {
        rule.validate()?;
        if self.rule_by_name(rule.name()).is_some() {
            return Err(ValidationError::DuplicateRuleName(rule.name().to_string()).into());
        }
        let id = rule.id();
        self.rules.push(rule);
        Ok(id)
    }

    /// Every rule, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] when no rule with `id` exists.
    pub fn rule(&self, id: RuleId) -> Result<&Rule, HomeError> {
        self.rules
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found(id))
    }

    #[must_use]
    pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    fn rule_mut(&mut self, id: RuleId) -> Result<&mut Rule, HomeError> {
        self.rules
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found(id))
    }

    /// Enable or disable one rule.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] when no rule with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn set_enabled(&mut self, id: RuleId, enabled: bool) -> Result<(), HomeError> {
        self.rule_mut(id)?.set_enabled(enabled);
        Ok(())
    }

    /// Flip one rule's enabled flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] when no rule with `id` exists.
    pub fn toggle(&mut self, id: RuleId) -> Result<bool, HomeError> {
        let rule = self.rule_mut(id)?;
        rule.set_enabled(!rule.is_enabled());
        Ok(rule.is_enabled())
    }

    /// Global switch. While off, [`evaluate_all`](Self::evaluate_all) does nothing.
    pub fn set_automation_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        tracing::info!(enabled, "automation switched");
    }

    #[must_use]
    pub fn is_automation_enabled(&self) -> bool {
        self.enabled
    }

    /// Run every enabled rule once against `registry`.
    pub fn evaluate_all(&mut self, registry: &mut DeviceRegistry) -> Evaluation {
        let mut evaluation = Evaluation::default();
        if !self.enabled {
            return evaluation;
        }

        let now = self.clock.now();
        let hour = self.clock.local_hour();
        for rule in self.rules.iter_mut().filter(|r| r.is_enabled()) {
            match run_rule(rule, registry, now, hour) {
                Ok(false) => {}
                Ok(true) => {
                    rule.mark_triggered(now);
                    tracing::debug!(rule = %rule.name(), count = rule.trigger_count(), "rule triggered");
                    evaluation.triggered.push(rule.id());
                }
                Err(source) => {
                    tracing::warn!(rule = %rule.name(), error = %source, "rule evaluation failed");
                    evaluation.failures.push(RuleEvaluationError {
                        rule: rule.name().to_string(),
                        source,
                    });
                }
            }
        }
        evaluation
    }
}

fn not_found(id: RuleId) -> HomeError {
    NotFoundError {
        entity: "Rule",
        id: id.to_string(),
    }
    .into()
}

/// Returns whether the rule fired.
fn run_rule(
    rule: &Rule,
    registry: &mut DeviceRegistry,
    now: Timestamp,
    hour: u32,
) -> Result<bool, HomeError> {
    for condition in rule.conditions() {
        if !evaluate_condition(condition, registry, hour)? {
            return Ok(false);
        }
    }
    for action in rule.actions() {
        execute_action(action, registry, now)?;
    }
    Ok(true)
}

fn evaluate_condition(
    condition: &Condition,
    registry: &DeviceRegistry,
    hour: u32,
) -> Result<bool, HomeError> {
    match condition {
        Condition::AttributeEquals {
            device,
            attribute,
            value,
        } => {
            let device = registry.get(*device)?;
            Ok(device
                .get(*attribute)
                .is_some_and(|current| values_match(&current, value)))
        }
        Condition::AnyMotion => Ok(powered_cameras(registry).any(|motion| motion)),
        Condition::NoMotion => {
            let mut cameras = powered_cameras(registry).peekable();
            Ok(cameras.peek().is_some() && cameras.all(|motion| !motion))
        }
        Condition::TemperatureOffTarget { target, tolerance } => Ok(registry
            .of_kind(DeviceKind::Thermostat)
            .filter(|d| d.power())
            .any(|d| match d.state() {
                DeviceState::Thermostat(t) => (t.current_temperature - target).abs() > *tolerance,
                _ => false,
            })),
        Condition::HourIs { hour: wanted } => Ok(hour == *wanted),
    }
}

/// Motion flag of every powered camera.
fn powered_cameras(registry: &DeviceRegistry) -> impl Iterator<Item = bool> + '_ {
    registry
        .of_kind(DeviceKind::Camera)
        .filter(|d| d.power())
        .map(|d| d.get(Attribute::MotionDetected) == Some(AttributeValue::Bool(true)))
}

/// Numeric values compare by magnitude so `22` matches `22.0`.
#[allow(clippy::cast_precision_loss)]
fn values_match(current: &AttributeValue, expected: &AttributeValue) -> bool {
    match (current, expected) {
        (AttributeValue::Float(a), AttributeValue::Int(b))
        | (AttributeValue::Int(b), AttributeValue::Float(a)) => (a - *b as f64).abs() < 1e-9,
        _ => current == expected,
    }
}

fn execute_action(
    action: &Action,
    registry: &mut DeviceRegistry,
    now: Timestamp,
) -> Result<(), HomeError> {
    match action {
        Action::SetAttribute {
            device,
            attribute,
            value,
        } => registry.set_attribute(*device, *attribute, value, now),
        Action::SetAll {
            kind,
            attribute,
            value,
            only_powered,
        } => {
            let targets: Vec<DeviceId> = registry
                .of_kind(*kind)
                .filter(|d| !*only_powered || d.power())
                .map(|d| d.id())
                .collect();
            for id in targets {
                registry.set_attribute(id, *attribute, value, now)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homesim_domain::automation::presets;
    use homesim_domain::time::{Timestamp, now};

    struct FixedClock {
        at: Timestamp,
        hour: u32,
    }

    impl FixedClock {
        fn at_hour(hour: u32) -> Self {
            Self { at: now(), hour }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.at
        }

        fn local_hour(&self) -> u32 {
            self.hour
        }
    }

    fn engine() -> AutomationEngine<FixedClock> {
        AutomationEngine::new(FixedClock::at_hour(12))
    }

    fn bool_value(registry: &DeviceRegistry, id: DeviceId, attribute: Attribute) -> bool {
        registry.get(id).unwrap().get(attribute) == Some(AttributeValue::Bool(true))
    }

    fn int_value(registry: &DeviceRegistry, id: DeviceId, attribute: Attribute) -> Option<i64> {
        match registry.get(id).unwrap().get(attribute) {
            Some(AttributeValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    /// One light and one powered camera.
    fn hallway() -> (DeviceRegistry, DeviceId, DeviceId) {
        let mut registry = DeviceRegistry::new();
        let light = registry
            .create_device(DeviceKind::Light, "Hall Light", "Hall", [])
            .unwrap();
        let camera = registry
            .create_device(
                DeviceKind::Camera,
                "Hall Camera",
                "Hall",
                [(Attribute::Power, AttributeValue::Bool(true))],
            )
            .unwrap();
        (registry, light, camera)
    }

    #[test]
    fn should_turn_lights_on_when_motion_detected() {
        let (mut registry, light, camera) = hallway();
        let mut engine = engine();
        let rule_id = engine.register_rule(presets::motion_lighting().unwrap()).unwrap();

        registry
            .set_attribute(camera, Attribute::MotionDetected, &AttributeValue::Bool(true), now())
            .unwrap();
        let evaluation = engine.evaluate_all(&mut registry);

        assert_eq!(evaluation.triggered, vec![rule_id]);
        assert!(evaluation.is_clean());
        assert!(bool_value(&registry, light, Attribute::Power));
        assert_eq!(int_value(&registry, light, Attribute::Brightness), Some(100));
        let rule = engine.rule(rule_id).unwrap();
        assert_eq!(rule.trigger_count(), 1);
        assert!(rule.last_triggered().is_some());
    }

    #[test]
    fn should_switch_light_on_from_camera_condition_until_disabled() {
        let (mut registry, light, camera) = hallway();
        let mut engine = engine();
        let rule_id = engine
            .register_rule(
                Rule::builder()
                    .name("MotionLighting")
                    .condition(Condition::AttributeEquals {
                        device: camera,
                        attribute: Attribute::MotionDetected,
                        value: AttributeValue::Bool(true),
                    })
                    .action(Action::SetAttribute {
                        device: light,
                        attribute: Attribute::Power,
                        value: AttributeValue::Bool(true),
                    })
                    .build()
                    .unwrap(),
            )
            .unwrap();

        assert!(engine.evaluate_all(&mut registry).triggered.is_empty());
        assert!(!bool_value(&registry, light, Attribute::Power));

        registry
            .set_attribute(camera, Attribute::MotionDetected, &AttributeValue::Bool(true), now())
            .unwrap();
        assert_eq!(engine.evaluate_all(&mut registry).triggered, vec![rule_id]);
        assert!(bool_value(&registry, light, Attribute::Power));

        registry
            .set_attribute(light, Attribute::Power, &AttributeValue::Bool(false), now())
            .unwrap();
        engine.set_enabled(rule_id, false).unwrap();
        assert!(engine.evaluate_all(&mut registry).triggered.is_empty());
        assert!(!bool_value(&registry, light, Attribute::Power));
        assert_eq!(engine.rule(rule_id).unwrap().trigger_count(), 1);
    }

    #[test]
    fn should_stamp_rule_with_clock_time() {
        let (mut registry, _, _) = hallway();
        let clock = FixedClock::at_hour(12);
        let at = clock.at;
        let mut engine = AutomationEngine::new(clock);
        let id = engine
            .register_rule(
                Rule::builder()
                    .name("Always")
                    .action(Action::set_all(DeviceKind::Light, Attribute::ColorTemperature, 3000))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        engine.evaluate_all(&mut registry);

        assert_eq!(engine.rule(id).unwrap().last_triggered(), Some(at));
        assert!(registry.of_kind(DeviceKind::Light).all(|d| d.last_changed() == at));
    }

    #[test]
    fn should_not_fire_disabled_rule() {
        let (mut registry, light, camera) = hallway();
        let mut engine = engine();
        let rule_id = engine.register_rule(presets::motion_lighting().unwrap()).unwrap();
        engine.set_enabled(rule_id, false).unwrap();

        registry
            .set_attribute(camera, Attribute::MotionDetected, &AttributeValue::Bool(true), now())
            .unwrap();
        let evaluation = engine.evaluate_all(&mut registry);

        assert!(evaluation.triggered.is_empty());
        assert!(!bool_value(&registry, light, Attribute::Power));
        assert!(engine.rule(rule_id).unwrap().last_triggered().is_none());
    }

    #[test]
    fn should_do_nothing_while_automation_switched_off() {
        let (mut registry, light, camera) = hallway();
        let mut engine = engine();
        engine.register_rule(presets::motion_lighting().unwrap()).unwrap();
        engine.set_automation_enabled(false);

        registry
            .set_attribute(camera, Attribute::MotionDetected, &AttributeValue::Bool(true), now())
            .unwrap();
        let evaluation = engine.evaluate_all(&mut registry);

        assert!(evaluation.triggered.is_empty());
        assert!(!bool_value(&registry, light, Attribute::Power));
    }

    #[test]
    fn should_reach_same_state_when_evaluated_twice() {
        let (mut registry, light, camera) = hallway();
        let mut engine = engine();
        engine.register_rule(presets::motion_lighting().unwrap()).unwrap();
        registry
            .set_attribute(camera, Attribute::MotionDetected, &AttributeValue::Bool(true), now())
            .unwrap();

        engine.evaluate_all(&mut registry);
        let first = registry.get(light).unwrap().attributes();
        engine.evaluate_all(&mut registry);
        let second = registry.get(light).unwrap().attributes();

        assert_eq!(first, second);
    }

    #[test]
    fn should_continue_with_next_rule_when_one_fails() {
        let (mut registry, light, _) = hallway();
        let mut engine = engine();
        let broken = Rule::builder()
            .name("Broken")
            .action(Action::SetAttribute {
                device: light,
                attribute: Attribute::Brightness,
                value: AttributeValue::Int(500),
            })
            .build()
            .unwrap();
        let working = Rule::builder()
            .name("Working")
            .action(Action::set_all(DeviceKind::Light, Attribute::ColorTemperature, 3000))
            .build()
            .unwrap();
        engine.register_rule(broken).unwrap();
        let working_id = engine.register_rule(working).unwrap();

        let evaluation = engine.evaluate_all(&mut registry);

        assert_eq!(evaluation.triggered, vec![working_id]);
        assert_eq!(evaluation.failures.len(), 1);
        assert_eq!(evaluation.failures[0].rule, "Broken");
        assert!(matches!(evaluation.failures[0].source, HomeError::OutOfRange(_)));
        assert_eq!(int_value(&registry, light, Attribute::ColorTemperature), Some(3000));
        assert_eq!(int_value(&registry, light, Attribute::Brightness), Some(0));
    }

    #[test]
    fn should_report_unknown_device_in_condition_as_failure() {
        let (mut registry, _, _) = hallway();
        let mut engine = engine();
        engine
            .register_rule(
                Rule::builder()
                    .name("Ghost")
                    .condition(Condition::AttributeEquals {
                        device: DeviceId::new(),
                        attribute: Attribute::Power,
                        value: AttributeValue::Bool(true),
                    })
                    .action(Action::set_all(DeviceKind::Light, Attribute::Power, true))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let evaluation = engine.evaluate_all(&mut registry);

        assert!(matches!(
            evaluation.failures[0].source,
            HomeError::UnknownDevice(_)
        ));
    }

    #[test]
    fn should_evaluate_rules_in_registration_order() {
        let (mut registry, light, _) = hallway();
        let mut engine = engine();
        let dim = Rule::builder()
            .name("Dim")
            .action(Action::set_all(DeviceKind::Light, Attribute::Brightness, 10))
            .build()
            .unwrap();
        let bright = Rule::builder()
            .name("Bright")
            .action(Action::set_all(DeviceKind::Light, Attribute::Brightness, 90))
            .build()
            .unwrap();
        let dim_id = engine.register_rule(dim).unwrap();
        let bright_id = engine.register_rule(bright).unwrap();

        let evaluation = engine.evaluate_all(&mut registry);

        assert_eq!(evaluation.triggered, vec![dim_id, bright_id]);
        assert_eq!(int_value(&registry, light, Attribute::Brightness), Some(90));
    }

    #[test]
    fn should_reject_duplicate_rule_name() {
        let mut engine = engine();
        engine.register_rule(presets::auto_lock().unwrap()).unwrap();
        let result = engine.register_rule(presets::auto_lock().unwrap());
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::DuplicateRuleName(name))) if name == "Auto Lock"
        ));
        assert_eq!(engine.rules().len(), 1);
    }

    #[test]
    fn should_lock_only_powered_doors_when_no_motion() {
        let (mut registry, _, _) = hallway();
        let powered = registry
            .create_device(
                DeviceKind::Door,
                "Front Door",
                "Entrance",
                [
                    (Attribute::Power, AttributeValue::Bool(true)),
                    (Attribute::Locked, AttributeValue::Bool(false)),
                ],
            )
            .unwrap();
        let unpowered = registry
            .create_device(
                DeviceKind::Door,
                "Back Door",
                "Garden",
                [(Attribute::Locked, AttributeValue::Bool(false))],
            )
            .unwrap();
        let mut engine = engine();
        engine.register_rule(presets::auto_lock().unwrap()).unwrap();

        engine.evaluate_all(&mut registry);

        assert!(bool_value(&registry, powered, Attribute::Locked));
        assert!(!bool_value(&registry, unpowered, Attribute::Locked));
    }

    #[test]
    fn should_not_treat_missing_cameras_as_no_motion() {
        let mut registry = DeviceRegistry::new();
        let door = registry
            .create_device(
                DeviceKind::Door,
                "Front Door",
                "Entrance",
                [
                    (Attribute::Power, AttributeValue::Bool(true)),
                    (Attribute::Locked, AttributeValue::Bool(false)),
                ],
            )
            .unwrap();
        let mut engine = engine();
        engine.register_rule(presets::auto_lock().unwrap()).unwrap();

        let evaluation = engine.evaluate_all(&mut registry);

        assert!(evaluation.triggered.is_empty());
        assert!(!bool_value(&registry, door, Attribute::Locked));
    }

    #[test]
    fn should_retarget_thermostat_outside_tolerance() {
        let mut registry = DeviceRegistry::new();
        let thermostat = registry
            .create_device(
                DeviceKind::Thermostat,
                "Living Room Thermostat",
                "Living Room",
                [(Attribute::TargetTemperature, AttributeValue::Float(26.0))],
            )
            .unwrap();
        let mut engine = engine();
        engine.register_rule(presets::temperature_control(22.0).unwrap()).unwrap();

        // current 20.0 is 2 degrees off 22
        let evaluation = engine.evaluate_all(&mut registry);

        assert_eq!(evaluation.triggered.len(), 1);
        assert_eq!(
            registry.get(thermostat).unwrap().get(Attribute::TargetTemperature),
            Some(AttributeValue::Float(22.0))
        );
    }

    #[test]
    fn should_fire_routine_only_at_its_hour() {
        let (mut registry, light, _) = hallway();
        let mut at_seven = AutomationEngine::new(FixedClock::at_hour(7));
        let mut at_eight = AutomationEngine::new(FixedClock::at_hour(8));
        at_seven.register_rule(presets::morning_routine(7).unwrap()).unwrap();
        at_eight.register_rule(presets::morning_routine(7).unwrap()).unwrap();

        assert!(at_eight.evaluate_all(&mut registry).triggered.is_empty());
        assert_eq!(at_seven.evaluate_all(&mut registry).triggered.len(), 1);
        assert_eq!(int_value(&registry, light, Attribute::Brightness), Some(70));
        assert_eq!(int_value(&registry, light, Attribute::ColorTemperature), Some(5000));
    }

    #[test]
    fn should_match_int_condition_against_float_attribute() {
        assert!(values_match(&AttributeValue::Float(22.0), &AttributeValue::Int(22)));
        assert!(!values_match(&AttributeValue::Float(22.5), &AttributeValue::Int(22)));
        assert!(!values_match(&AttributeValue::Bool(true), &AttributeValue::Int(1)));
    }

    #[test]
    fn should_toggle_rule_and_report_missing_rule() {
        let mut engine = engine();
        let id = engine.register_rule(presets::energy_saving().unwrap()).unwrap();

        assert!(!engine.toggle(id).unwrap());
        assert!(engine.toggle(id).unwrap());
        assert!(matches!(
            engine.set_enabled(RuleId::new(), true),
            Err(HomeError::NotFound(_))
        ));
        assert_eq!(engine.rule_by_name("Energy Saving").map(Rule::id), Some(id));
    }
}
