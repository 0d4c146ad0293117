//! Room restrictions: date-range holds on a room.
//!
//! A restriction is either tied to a guest reservation or is an owner
//! block. Blocks always cover exactly one night, `[D, D+1)`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::ReservationId;
use crate::stay::InvalidStayError;
use crate::{RoomId, Stay};

/// A restriction identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionId(i64);

impl RestrictionId {
    /// Wraps a storage-assigned id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RestrictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a restriction holds the room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reservation_id")]
pub enum RestrictionKind {
    /// The room is occupied by a guest reservation.
    Reservation(ReservationId),
    /// The owner has blocked the room.
    Block,
}

impl RestrictionKind {
    /// Returns the reservation id for reservation-kind restrictions.
    #[must_use]
    pub const fn reservation_id(self) -> Option<ReservationId> {
        match self {
            Self::Reservation(id) => Some(id),
            Self::Block => None,
        }
    }

    /// Returns `true` for owner blocks.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// A persisted restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRestriction {
    /// Storage id.
    pub id: RestrictionId,
    /// The restricted room.
    pub room_id: RoomId,
    /// The held nights.
    pub span: Stay,
    /// Reservation or block.
    pub kind: RestrictionKind,
}

/// A restriction that has not been written yet.
///
/// # Examples
///
/// ```
/// use innkeep::{NewRestriction, RoomId};
/// use innkeep::stay::parse_date;
///
/// let day = parse_date("2024-07-15").unwrap();
/// let block = NewRestriction::block(RoomId::try_from(1).unwrap(), day).unwrap();
/// assert_eq!(block.span.nights(), 1);
/// assert!(block.kind.is_block());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRestriction {
    /// The restricted room.
    pub room_id: RoomId,
    /// The held nights.
    pub span: Stay,
    /// Reservation or block.
    pub kind: RestrictionKind,
}

impl NewRestriction {
    /// Creates an owner block for the night of `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if `day` is the last representable date.
    pub fn block(room_id: RoomId, day: NaiveDate) -> Result<Self, InvalidStayError> {
        Ok(Self {
            room_id,
            span: Stay::single_day(day)?,
            kind: RestrictionKind::Block,
        })
    }

    /// Creates the restriction occupying a room for a reservation.
    #[must_use]
    pub const fn for_reservation(room_id: RoomId, stay: Stay, reservation_id: ReservationId) -> Self {
        Self {
            room_id,
            span: stay,
            kind: RestrictionKind::Reservation(reservation_id),
        }
    }
}
