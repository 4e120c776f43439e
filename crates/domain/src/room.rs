//! Room — a display label that groups devices.
//!
//! A room has no identity beyond its label: two rooms with the same label are
//! the same room.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HomeError, ValidationError};

/// A validated, trimmed, non-empty room label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Room(String);

impl Room {
    /// Create a room from a label.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRoom`] when the label is blank.
    pub fn new(label: impl Into<String>) -> Result<Self, HomeError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRoom.into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The label as displayed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Room {
    type Error = HomeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Room> for String {
    fn from(room: Room) -> Self {
        room.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_room_when_label_provided() {
        let room = Room::new("Living Room").unwrap();
        assert_eq!(room.as_str(), "Living Room");
        assert_eq!(room.to_string(), "Living Room");
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let room = Room::new("  Kitchen ").unwrap();
        assert_eq!(room, Room::new("Kitchen").unwrap());
    }

    #[test]
    fn should_return_validation_error_when_label_is_blank() {
        let result = Room::new("   ");
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::EmptyRoom))
        ));
    }

    #[test]
    fn should_reject_blank_label_when_deserializing() {
        assert!(serde_json::from_str::<Room>("\"\"").is_err());
        let room: Room = serde_json::from_str("\"Bedroom\"").unwrap();
        assert_eq!(room.as_str(), "Bedroom");
    }
}
