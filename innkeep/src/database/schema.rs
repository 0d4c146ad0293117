//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, triggers and
//! shared statements for the innkeep booking store. Calendar dates are
//! stored as ISO `YYYY-MM-DD` text so that string comparison is calendar
//! comparison.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY NOT NULL CHECK (id > 0),
        room_name TEXT NOT NULL CHECK (length(room_name) > 0),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// A reservation row never exists without its row in `room_restrictions`;
/// both are written in the same transaction.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        processed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (start_date < end_date)
    )";

/// SQL statement to create the room restrictions table.
///
/// `reservation_id` is NULL for owner blocks. Deleting a reservation
/// deletes its restriction.
pub const CREATE_RESTRICTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_restrictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        reservation_id INTEGER REFERENCES reservations(id) ON DELETE CASCADE,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (start_date < end_date)
    )";

/// SQL statement to create the per-session calendar snapshot table.
pub const CREATE_SNAPSHOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS calendar_snapshots (
        session TEXT NOT NULL,
        room_id INTEGER NOT NULL,
        month TEXT NOT NULL,
        blocks TEXT NOT NULL,
        expires_at INTEGER NOT NULL,
        PRIMARY KEY (session, room_id, month)
    )";

/// SQL statement to create the overlap-lookup index on restrictions.
///
/// This index serves both the availability query and month materialization.
pub const CREATE_RESTRICTION_RANGE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_restrictions_room_range
    ON room_restrictions(room_id, start_date, end_date)";

/// SQL statement to keep owner blocks unique per room and day.
pub const CREATE_BLOCK_DAY_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_restrictions_block_day
    ON room_restrictions(room_id, start_date)
    WHERE reservation_id IS NULL";

/// SQL statement to create an index for the unprocessed-reservations list.
pub const CREATE_PROCESSED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_processed ON reservations(processed)";

/// SQL statement to create the snapshot expiry index.
pub const CREATE_SNAPSHOT_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_snapshots_expires ON calendar_snapshots(expires_at)";

/// Trigger rejecting overlapping reservation-kind restrictions for a room.
///
/// This holds even for writers that bypass the engine.
pub const CREATE_NO_DOUBLE_BOOKING_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_restrictions_no_double_booking
    BEFORE INSERT ON room_restrictions
    WHEN NEW.reservation_id IS NOT NULL
    BEGIN
        SELECT RAISE(ABORT, 'room already reserved for an overlapping stay')
        WHERE EXISTS (
            SELECT 1 FROM room_restrictions
            WHERE room_id = NEW.room_id
              AND reservation_id IS NOT NULL
              AND start_date < NEW.end_date
              AND end_date > NEW.start_date
        );
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a room.
///
/// Used by both single and batch insert operations.
pub const INSERT_ROOM: &str = r"
    INSERT INTO rooms (id, room_name, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?3)
";

/// SQL statement to insert a restriction.
pub const INSERT_RESTRICTION: &str = r"
    INSERT INTO room_restrictions
    (room_id, reservation_id, start_date, end_date, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5)
";

/// Counts restrictions of either kind overlapping `[?2, ?3)` for room `?1`.
pub const COUNT_OVERLAPPING_RESTRICTIONS: &str = r"
    SELECT COUNT(*) FROM room_restrictions
    WHERE room_id = ?1 AND start_date < ?3 AND end_date > ?2
";
