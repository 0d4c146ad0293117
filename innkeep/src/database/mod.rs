//! Database layer for persistent storage of rooms and bookings.
//!
//! This module provides a SQLite-based storage layer: connection
//! management, schema versioning, the [`crate::Repository`]
//! implementation, and the session snapshot store. The no-double-booking
//! rule is enforced here twice, by an in-transaction availability re-check
//! and by a trigger on `room_restrictions`.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::{Repository, Reservation, Room, RoomId, Stay};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let room_id = RoomId::try_from(1).unwrap();
//! db.insert_room(&Room::new(room_id, "General's Quarters")).unwrap();
//!
//! let reservation = Reservation::builder(room_id, Stay::parse("2024-07-01", "2024-07-05").unwrap())
//!     .first_name("Grace")
//!     .last_name("Hopper")
//!     .email("grace@example.com")
//!     .phone("555-0101")
//!     .build()
//!     .unwrap();
//! let confirmation = db.insert_reservation_with_restriction(&reservation).unwrap();
//! println!("reservation {}", confirmation.reservation_id);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod repository;
mod schema;
mod snapshots;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig,
    DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;
pub use snapshots::SnapshotStore;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
