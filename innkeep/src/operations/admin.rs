//! Reservation administration.
//!
//! Lookups and edits of stored reservations by id. Unknown ids are reported
//! as [`Error::NotFound`] rather than silently ignored.

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::{GuestContact, Reservation, ReservationId};

fn not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}

/// Loads a reservation.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or a storage error.
pub fn get_reservation<R: Repository + ?Sized>(repo: &R, id: ReservationId) -> Result<Reservation> {
    repo.get_reservation(id)?.ok_or_else(|| not_found(id))
}

/// Replaces a reservation's guest contact details.
///
/// The stay cannot be changed; cancel and re-book instead.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or a storage error.
pub fn update_guest<R: Repository + ?Sized>(
    repo: &mut R,
    id: ReservationId,
    guest: GuestContact,
) -> Result<Reservation> {
    let updated = get_reservation(repo, id)?.with_guest(guest);
    if !repo.update_reservation(&updated)? {
        return Err(not_found(id));
    }
    log::info!("updated guest details of reservation {id}");
    Ok(updated)
}

/// Marks a reservation as processed (or back to new).
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or a storage error.
pub fn set_processed<R: Repository + ?Sized>(
    repo: &mut R,
    id: ReservationId,
    processed: bool,
) -> Result<Reservation> {
    let current = get_reservation(repo, id)?;
    if current.processed() == processed {
        return Ok(current);
    }
    let updated = current.with_processed(processed);
    if !repo.update_reservation(&updated)? {
        return Err(not_found(id));
    }
    log::info!("reservation {id} processed: {processed}");
    Ok(updated)
}

/// Deletes a reservation together with its restriction, freeing the room.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or a storage error.
pub fn delete_reservation<R: Repository + ?Sized>(repo: &mut R, id: ReservationId) -> Result<()> {
    if !repo.delete_reservation(id)? {
        return Err(not_found(id));
    }
    log::info!("deleted reservation {id}");
    Ok(())
}
