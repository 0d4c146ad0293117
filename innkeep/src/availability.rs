//! Availability queries.
//!
//! A room is available over a stay iff none of its restrictions, reservation
//! or block, overlaps the stay's half-open range. Both queries are
//! read-only; any storage failure aborts with no partial result.

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::{Room, RoomId, Stay};

/// Lists every room free for the whole stay, ordered by room id.
///
/// # Errors
///
/// Returns a storage error if restrictions cannot be read.
///
/// # Examples
///
/// ```no_run
/// use innkeep::availability::search_availability;
/// use innkeep::{Database, DatabaseConfig, Stay};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let stay = Stay::parse("2024-07-01", "2024-07-05").unwrap();
/// for room in search_availability(&db, &stay).unwrap() {
///     println!("{room}");
/// }
/// ```
pub fn search_availability<R: Repository + ?Sized>(repo: &R, stay: &Stay) -> Result<Vec<Room>> {
    let rooms = repo.find_rooms_free_in_range(stay)?;
    log::debug!("{} room(s) free for {stay}", rooms.len());
    Ok(rooms)
}

/// Returns `true` if the room is free for the whole stay.
///
/// # Errors
///
/// Returns a validation error for an unknown room, or a storage error if
/// restrictions cannot be read.
pub fn is_room_available<R: Repository + ?Sized>(
    repo: &R,
    room_id: RoomId,
    stay: &Stay,
) -> Result<bool> {
    if repo.get_room(room_id)?.is_none() {
        return Err(Error::Validation {
            field: "room_id".into(),
            message: format!("room {room_id} does not exist"),
        });
    }
    let free = repo.is_room_free_in_range(room_id, stay)?;
    log::debug!("room {room_id} free for {stay}: {free}");
    Ok(free)
}
