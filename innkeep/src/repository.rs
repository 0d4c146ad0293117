//! The storage interface consumed by the engine.
//!
//! The availability query, the calendar materializer and the operations
//! layer are written against [`Repository`] rather than a concrete store.
//! [`crate::database::Database`] is the production implementation.

use chrono::NaiveDate;

use crate::error::Result;
use crate::reservation::{BookingConfirmation, ReservationId};
use crate::restriction::{NewRestriction, RestrictionId, RoomRestriction};
use crate::{Reservation, Room, RoomId, Stay};

/// Persistent storage of rooms, reservations and restrictions.
///
/// Read methods take `&self`; writes take `&mut self` and are each atomic.
#[cfg_attr(test, mockall::automock)]
pub trait Repository {
    /// Lists every room ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn list_all_rooms(&self) -> Result<Vec<Room>>;

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_room(&self, id: RoomId) -> Result<Option<Room>>;

    /// Lists rooms with no restriction of either kind overlapping `stay`,
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn find_rooms_free_in_range(&self, stay: &Stay) -> Result<Vec<Room>>;

    /// Returns `true` if no restriction for the room overlaps `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn is_room_free_in_range(&self, room_id: RoomId, stay: &Stay) -> Result<bool>;

    /// Writes a reservation together with the restriction occupying its
    /// room, or neither.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the room is no longer free for
    /// the stay, or a storage error. Nothing is written on error.
    fn insert_reservation_with_restriction(
        &mut self,
        reservation: &Reservation,
    ) -> Result<BookingConfirmation>;

    /// Writes a single restriction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the restriction duplicates an
    /// existing block or overlaps a reservation-kind restriction.
    fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId>;

    /// Deletes an owner block, returning whether one was removed. An id
    /// naming a reservation-kind restriction deletes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool>;

    /// Lists the room's restrictions intersecting the inclusive day range
    /// `[first, last]`, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn restrictions_for_room_in_range(
        &self,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>>;

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Rewrites the guest contact and processed flag of a stored
    /// reservation, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the reservation carries no id.
    fn update_reservation(&mut self, reservation: &Reservation) -> Result<bool>;

    /// Deletes a reservation and its restriction, returning whether it
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    fn delete_reservation(&mut self, id: ReservationId) -> Result<bool>;
}
