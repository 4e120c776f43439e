//! Automation — condition → action rules over device state.
//!
//! A [`Rule`] is plain data. It holds an ordered list of [`Condition`]s that
//! must all hold and one or more [`Action`]s to execute. Evaluation lives in
//! the application layer, which owns the registry the rules refer to.

mod action;
mod condition;
pub mod presets;

pub use action::Action;
pub use condition::Condition;

use serde::{Deserialize, Serialize};

use crate::error::{HomeError, ValidationError};
use crate::id::RuleId;
use crate::time::Timestamp;

/// A rule that mutates devices when its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    id: RuleId,
    name: String,
    enabled: bool,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
    last_triggered: Option<Timestamp>,
    trigger_count: u64,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    /// - an [`Condition::HourIs`] names an hour past 23 ([`ValidationError::InvalidHour`])
    pub fn validate(&self) -> Result<(), HomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        for condition in &self.conditions {
            if let Condition::HourIs { hour } = condition
                && *hour > 23
            {
                return Err(ValidationError::InvalidHour(*hour).into());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Conditions that must all hold; empty means always.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn last_triggered(&self) -> Option<Timestamp> {
        self.last_triggered
    }

    /// How many times the rule has fired since startup.
    #[must_use]
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Record a successful firing.
    pub fn mark_triggered(&mut self, at: Timestamp) {
        self.last_triggered = Some(at);
        self.trigger_count += 1;
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    enabled: Option<bool>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] if required fields are missing or empty.
    pub fn build(self) -> Result<Rule, HomeError> {
        let rule = Rule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            conditions: self.conditions,
            actions: self.actions,
            last_triggered: None,
            trigger_count: 0,
        };
        rule.validate()?;
        Ok(rule)
    }
}
