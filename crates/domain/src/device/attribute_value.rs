//! Typed attribute values read from and written to devices.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, ValueKind};
use crate::error::ValidationError;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Parse user input (e.g. a dashboard form field) for `attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] when the text cannot be
    /// read as the attribute's [`ValueKind`].
    pub fn parse(attribute: Attribute, input: &str) -> Result<Self, ValidationError> {
        let text = input.trim();
        let invalid = || ValidationError::InvalidValue {
            attribute,
            input: input.to_string(),
        };
        match attribute.value_kind() {
            ValueKind::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "on" | "1" | "yes" => Ok(Self::Bool(true)),
                "false" | "off" | "0" | "no" => Ok(Self::Bool(false)),
                _ => Err(invalid()),
            },
            ValueKind::Int => text.parse().map(Self::Int).map_err(|_| invalid()),
            ValueKind::Float => text.parse().map(Self::Float).map_err(|_| invalid()),
            ValueKind::Text if text.is_empty() => Err(invalid()),
            ValueKind::Text => Ok(Self::Text(text.to_string())),
        }
    }

    pub(crate) fn as_bool(&self, attribute: Attribute) -> Result<bool, ValidationError> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => Err(mismatch(attribute)),
        }
    }

    pub(crate) fn as_int(&self, attribute: Attribute) -> Result<i64, ValidationError> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => Err(mismatch(attribute)),
        }
    }

    /// Integers are widened; floats pass through.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn as_float(&self, attribute: Attribute) -> Result<f64, ValidationError> {
        match self {
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f64),
            _ => Err(mismatch(attribute)),
        }
    }

    pub(crate) fn as_text(&self, attribute: Attribute) -> Result<&str, ValidationError> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(mismatch(attribute)),
        }
    }
}

fn mismatch(attribute: Attribute) -> ValidationError {
    ValidationError::TypeMismatch {
        attribute,
        expected: attribute.value_kind(),
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
