//! [`Repository`] implementation over `SQLite`.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::reservation::{BookingConfirmation, ReservationId};
use crate::restriction::{NewRestriction, RestrictionId, RoomRestriction};
use crate::{Reservation, Room, RoomId, Stay};

use super::connection::Database;

impl Repository for Database {
    fn list_all_rooms(&self) -> Result<Vec<Room>> {
        Self::list_rooms(&self.conn)
    }

    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        Self::find_room(&self.conn, id)
    }

    fn find_rooms_free_in_range(&self, stay: &Stay) -> Result<Vec<Room>> {
        Self::free_rooms(&self.conn, stay)
    }

    fn is_room_free_in_range(&self, room_id: RoomId, stay: &Stay) -> Result<bool> {
        Self::room_is_free(&self.conn, room_id, stay)
    }

    fn insert_reservation_with_restriction(
        &mut self,
        reservation: &Reservation,
    ) -> Result<BookingConfirmation> {
        let room_id = reservation.room_id();
        let stay = reservation.stay();

        let confirmation = self.with_immediate_transaction(|tx| {
            if Self::find_room(tx, room_id)?.is_none() {
                return Err(Error::Validation {
                    field: "room_id".into(),
                    message: format!("room {room_id} does not exist"),
                });
            }

            // Re-check under the write lock; the trigger backs this up for
            // writers outside the engine
            if !Self::room_is_free(tx, room_id, &stay)? {
                return Err(Error::Conflict {
                    details: format!("room {room_id} is no longer available for {stay}"),
                });
            }

            let reservation_id = Self::insert_reservation_simple(tx, reservation)?;
            let restriction_id = Self::insert_restriction_simple(
                tx,
                &NewRestriction::for_reservation(room_id, stay, reservation_id),
            )?;

            Ok(BookingConfirmation {
                reservation_id,
                restriction_id,
            })
        })?;

        log::info!(
            "booked room {room_id} for {stay} (reservation {}, restriction {})",
            confirmation.reservation_id,
            confirmation.restriction_id
        );
        Ok(confirmation)
    }

    fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId> {
        let id = self.with_immediate_transaction(|tx| Self::insert_restriction_simple(tx, restriction))?;
        log::debug!(
            "inserted restriction {id} on room {} for {}",
            restriction.room_id,
            restriction.span
        );
        Ok(id)
    }

    fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool> {
        self.with_immediate_transaction(|tx| Self::delete_restriction_simple(tx, id))
    }

    fn restrictions_for_room_in_range(
        &self,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>> {
        Self::restrictions_in_range(&self.conn, room_id, first, last)
    }

    fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Self::find_reservation(&self.conn, id)
    }

    fn update_reservation(&mut self, reservation: &Reservation) -> Result<bool> {
        self.with_immediate_transaction(|tx| Self::update_reservation_simple(tx, reservation))
    }

    fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        self.with_immediate_transaction(|tx| Self::delete_reservation_simple(tx, id))
    }
}
