//! Room types.
//!
//! Rooms are read-mostly reference data: they are seeded by an administrator
//! and never change identity afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A room identifier (always positive).
///
/// # Examples
///
/// ```
/// use innkeep::RoomId;
///
/// let id = RoomId::try_from(7).unwrap();
/// assert_eq!(id.value(), 7);
/// assert!(RoomId::try_from(0).is_err());
/// assert_eq!("7".parse::<RoomId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for RoomId {
    type Error = InvalidRoomIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            Err(InvalidRoomIdError {
                value: value.to_string(),
                reason: "room id must be positive".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl FromStr for RoomId {
    type Err = InvalidRoomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| InvalidRoomIdError {
            value: s.to_string(),
            reason: "room id must be an integer".into(),
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid room ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRoomIdError {
    /// The rejected value as supplied.
    pub value: String,
    /// The reason the value was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidRoomIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid room id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidRoomIdError {}

impl From<InvalidRoomIdError> for crate::error::Error {
    fn from(err: InvalidRoomIdError) -> Self {
        Self::Validation {
            field: "room_id".into(),
            message: err.to_string(),
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
}

impl Room {
    /// Creates a room value.
    #[must_use]
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the room id.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
