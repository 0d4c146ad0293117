//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use innkeep::database::{Database, DatabaseConfig};
use innkeep::stay::parse_date;
use innkeep::{GuestContact, Reservation, Room, RoomId, Stay};
use tempfile::TempDir;

/// A database in a temporary directory, removed on drop.
pub struct TestDb {
    /// Keeps the directory alive.
    pub dir: TempDir,
    /// The open database.
    pub db: Database,
}

impl TestDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("innkeep.db"))).unwrap();
        Self { dir, db }
    }

    /// Creates a database with `(id, name)` rooms.
    pub fn with_rooms(rooms: &[(i64, &str)]) -> Self {
        let mut test_db = Self::new();
        let rooms: Vec<Room> = rooms
            .iter()
            .map(|(id, name)| Room::new(room(*id), *name))
            .collect();
        test_db.db.batch_insert_rooms(&rooms).unwrap();
        test_db
    }

    /// Path of the database file, for opening more connections.
    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("innkeep.db")
    }

    /// The temporary data directory.
    #[allow(dead_code)]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }
}

/// The two rooms of the original inn.
#[allow(dead_code)]
pub const INN_ROOMS: &[(i64, &str)] = &[(1, "General's Quarters"), (2, "Major's Suite")];

pub fn room(id: i64) -> RoomId {
    RoomId::try_from(id).unwrap()
}

#[allow(dead_code)]
pub fn day(value: &str) -> NaiveDate {
    parse_date(value).unwrap()
}

pub fn stay(start: &str, end: &str) -> Stay {
    Stay::parse(start, end).unwrap()
}

#[allow(dead_code)]
pub fn guest() -> GuestContact {
    GuestContact::new("Grace", "Hopper", "grace@example.com", "555-0101").unwrap()
}

/// An unsaved reservation with fixed guest details.
#[allow(dead_code)]
pub fn reservation(room_id: i64, start: &str, end: &str) -> Reservation {
    Reservation::builder(room(room_id), stay(start, end))
        .guest(&guest())
        .build()
        .unwrap()
}
