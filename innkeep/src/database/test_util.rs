//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{Reservation, Room, RoomId, Stay};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Parses an ISO day.
///
/// # Panics
///
/// Panics on a malformed date.
#[must_use]
pub fn day(value: &str) -> NaiveDate {
    crate::stay::parse_date(value).unwrap()
}

/// Builds a stay from two ISO days.
///
/// # Panics
///
/// Panics on malformed or inverted dates.
#[must_use]
pub fn stay(start: &str, end: &str) -> Stay {
    Stay::parse(start, end).unwrap()
}

/// Inserts `(id, name)` rooms.
///
/// # Panics
///
/// Panics if any insert fails.
pub fn seed_rooms(db: &mut Database, rooms: &[(i64, &str)]) {
    let rooms: Vec<Room> = rooms
        .iter()
        .map(|(id, name)| Room::new(RoomId::try_from(*id).unwrap(), *name))
        .collect();
    db.batch_insert_rooms(&rooms).unwrap();
}

/// Creates an unsaved reservation for a room and stay with fixed guest
/// details.
///
/// # Panics
///
/// Panics if the reservation cannot be built.
#[must_use]
pub fn create_test_reservation(room: i64, start: &str, end: &str) -> Reservation {
    Reservation::builder(RoomId::try_from(room).unwrap(), stay(start, end))
        .first_name("Grace")
        .last_name("Hopper")
        .email("grace@example.com")
        .phone("555-0101")
        .build()
        .unwrap()
}
