//! Database CRUD operations for rooms, reservations and restrictions.
//!
//! Reads are associated functions taking a `&Connection` so they can run
//! inside an open transaction. Writes ending in `_simple` likewise run on a
//! caller-provided connection or transaction; the [`crate::Repository`]
//! implementation wraps them in `IMMEDIATE` transactions.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::ReservationId;
use crate::restriction::{NewRestriction, RestrictionId, RestrictionKind, RoomRestriction};
use crate::{Reservation, Room, RoomId, Stay};

use super::connection::Database;
use super::schema::{COUNT_OVERLAPPING_RESTRICTIONS, INSERT_RESTRICTION, INSERT_ROOM};

/// Maps a raw storage failure onto the engine's error taxonomy.
///
/// Trigger and uniqueness violations become [`Error::Conflict`], missing
/// foreign keys become validation errors, and lock contention past the busy
/// timeout becomes [`Error::LockTimeout`].
pub(crate) fn classify_error(err: Error, busy_timeout: Duration) -> Error {
    let Error::Database(inner) = err else {
        return err;
    };
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = inner {
        let details = message.clone().unwrap_or_else(|| failure.to_string());
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_TRIGGER
            | ffi::SQLITE_CONSTRAINT_UNIQUE
            | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => return Error::Conflict { details },
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return Error::Validation {
                    field: "room_id".into(),
                    message: "referenced room or reservation does not exist".into(),
                }
            }
            _ => {}
        }
        if matches!(
            failure.code,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
        ) {
            return Error::LockTimeout {
                seconds: busy_timeout.as_secs(),
            };
        }
    }
    Error::Database(inner)
}

fn conversion_error(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

/// Expects row fields in this order: id, `room_name`
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let id = RoomId::try_from(id).map_err(conversion_error)?;
    Ok(Room::new(id, name))
}

/// Expects row fields in this order: id, `first_name`, `last_name`, email,
/// phone, `room_id`, `start_date`, `end_date`, processed, `created_at`,
/// `updated_at`
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(5)?;
    let start: NaiveDate = row.get(6)?;
    let end: NaiveDate = row.get(7)?;
    let created_at: DateTime<Utc> = row.get(9)?;
    let updated_at: DateTime<Utc> = row.get(10)?;

    let room_id = RoomId::try_from(room_id).map_err(conversion_error)?;
    let stay = Stay::new(start, end).map_err(conversion_error)?;

    Reservation::builder(room_id, stay)
        .id(ReservationId::new(id))
        .first_name(row.get::<_, String>(1)?)
        .last_name(row.get::<_, String>(2)?)
        .email(row.get::<_, String>(3)?)
        .phone(row.get::<_, String>(4)?)
        .processed(row.get(8)?)
        .created_at(created_at)
        .updated_at(updated_at)
        .build()
        .map_err(conversion_error)
}

/// Expects row fields in this order: id, `room_id`, `reservation_id`,
/// `start_date`, `end_date`
fn row_to_restriction(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomRestriction> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let reservation_id: Option<i64> = row.get(2)?;
    let start: NaiveDate = row.get(3)?;
    let end: NaiveDate = row.get(4)?;

    Ok(RoomRestriction {
        id: RestrictionId::new(id),
        room_id: RoomId::try_from(room_id).map_err(conversion_error)?,
        span: Stay::new(start, end).map_err(conversion_error)?,
        kind: reservation_id.map_or(RestrictionKind::Block, |id| {
            RestrictionKind::Reservation(ReservationId::new(id))
        }),
    })
}

const SELECT_ROOMS: &str = "SELECT id, room_name FROM rooms ORDER BY id";

const SELECT_ROOM: &str = "SELECT id, room_name FROM rooms WHERE id = ?1";

const SELECT_FREE_ROOMS: &str = r"
    SELECT r.id, r.room_name
    FROM rooms r
    WHERE NOT EXISTS (
        SELECT 1 FROM room_restrictions rr
        WHERE rr.room_id = r.id AND rr.start_date < ?2 AND rr.end_date > ?1
    )
    ORDER BY r.id
";

const SELECT_RESTRICTIONS_IN_RANGE: &str = r"
    SELECT id, room_id, reservation_id, start_date, end_date
    FROM room_restrictions
    WHERE room_id = ?1 AND end_date > ?2 AND start_date <= ?3
    ORDER BY start_date, id
";

const RESERVATION_COLUMNS: &str = "id, first_name, last_name, email, phone, room_id, \
     start_date, end_date, processed, created_at, updated_at";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (first_name, last_name, email, phone, room_id, start_date, end_date, processed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5, processed = ?6, updated_at = ?7
    WHERE id = ?1
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?1";

const DELETE_BLOCK: &str =
    "DELETE FROM room_restrictions WHERE id = ?1 AND reservation_id IS NULL";

const SELECT_ORPHAN_RESERVATIONS: &str = r"
    SELECT COUNT(*) FROM reservations r
    WHERE NOT EXISTS (
        SELECT 1 FROM room_restrictions rr WHERE rr.reservation_id = r.id
    )
";

const SELECT_DOUBLE_BOOKINGS: &str = r"
    SELECT COUNT(*) FROM room_restrictions a
    JOIN room_restrictions b
      ON a.room_id = b.room_id AND a.id < b.id
    WHERE a.reservation_id IS NOT NULL AND b.reservation_id IS NOT NULL
      AND a.start_date < b.end_date AND a.end_date > b.start_date
";

impl Database {
    /// Inserts a room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if a room with the same id exists.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    /// use innkeep::{Room, RoomId};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// db.insert_room(&Room::new(RoomId::try_from(1).unwrap(), "General's Quarters")).unwrap();
    /// ```
    pub fn insert_room(&mut self, room: &Room) -> Result<()> {
        self.with_immediate_transaction(|tx| Self::insert_room_simple(tx, room))
    }

    /// Inserts a room using an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_room_simple(conn: &Connection, room: &Room) -> Result<()> {
        if room.name().trim().is_empty() {
            return Err(Error::Validation {
                field: "room_name".into(),
                message: "room name cannot be blank".into(),
            });
        }
        conn.execute(
            INSERT_ROOM,
            params![room.id().value(), room.name().trim(), Utc::now()],
        )?;
        Ok(())
    }

    /// Lists all rooms ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare_cached(SELECT_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        let mut stmt = conn.prepare_cached(SELECT_ROOM)?;
        Ok(stmt.query_row([id.value()], row_to_room).optional()?)
    }

    /// Lists rooms with no overlapping restriction, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn free_rooms(conn: &Connection, stay: &Stay) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare_cached(SELECT_FREE_ROOMS)?;
        let rooms = stmt
            .query_map(params![stay.start(), stay.end()], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Returns `true` if no restriction for the room overlaps `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_is_free(conn: &Connection, room_id: RoomId, stay: &Stay) -> Result<bool> {
        let count: i64 = conn.query_row(
            COUNT_OVERLAPPING_RESTRICTIONS,
            params![room_id.value(), stay.start(), stay.end()],
            |row| row.get(0),
        )?;
        Ok(count == 0)
    }

    /// Lists restrictions for a room intersecting the inclusive range
    /// `[first, last]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn restrictions_in_range(
        conn: &Connection,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>> {
        let mut stmt = conn.prepare_cached(SELECT_RESTRICTIONS_IN_RANGE)?;
        let restrictions = stmt
            .query_map(params![room_id.value(), first, last], row_to_restriction)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(restrictions)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt
            .query_row([id.value()], row_to_reservation)
            .optional()?)
    }

    /// Lists every reservation, latest stay first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// for reservation in Database::list_reservations(db.connection()).unwrap() {
    ///     println!("{} {}", reservation.guest().full_name(), reservation.stay());
    /// }
    /// ```
    pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY start_date DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists reservations not yet processed by an administrator, latest
    /// stay first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_new_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE processed = 0 \
             ORDER BY start_date DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Inserts a reservation row (without its restriction).
    ///
    /// This method is intended for use within an existing transaction that
    /// also writes the restriction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation_simple(
        conn: &Connection,
        reservation: &Reservation,
    ) -> Result<ReservationId> {
        let guest = reservation.guest();
        conn.execute(
            INSERT_RESERVATION,
            params![
                guest.first_name(),
                guest.last_name(),
                guest.email(),
                guest.phone(),
                reservation.room_id().value(),
                reservation.stay().start(),
                reservation.stay().end(),
                reservation.processed(),
                reservation.created_at(),
                reservation.updated_at(),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Inserts a restriction row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including trigger and
    /// uniqueness violations.
    pub fn insert_restriction_simple(
        conn: &Connection,
        restriction: &NewRestriction,
    ) -> Result<RestrictionId> {
        conn.execute(
            INSERT_RESTRICTION,
            params![
                restriction.room_id.value(),
                restriction.kind.reservation_id().map(ReservationId::value),
                restriction.span.start(),
                restriction.span.end(),
                Utc::now(),
            ],
        )?;
        Ok(RestrictionId::new(conn.last_insert_rowid()))
    }

    /// Deletes a block-kind restriction by id. Reservation-kind rows are
    /// left alone and report `false`; they go with their reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_restriction_simple(conn: &Connection, id: RestrictionId) -> Result<bool> {
        Ok(conn.execute(DELETE_BLOCK, [id.value()])? > 0)
    }

    /// Rewrites guest contact fields and the processed flag.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the reservation has no id, or an error
    /// if the update fails.
    pub fn update_reservation_simple(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        let id = reservation.id().ok_or_else(|| Error::Validation {
            field: "id".into(),
            message: "reservation has not been stored".into(),
        })?;
        let guest = reservation.guest();
        let rows = conn.execute(
            UPDATE_RESERVATION,
            params![
                id.value(),
                guest.first_name(),
                guest.last_name(),
                guest.email(),
                guest.phone(),
                reservation.processed(),
                reservation.updated_at(),
            ],
        )?;
        Ok(rows > 0)
    }

    /// Deletes a reservation; its restriction goes with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_simple(conn: &Connection, id: ReservationId) -> Result<bool> {
        Ok(conn.execute(DELETE_RESERVATION, [id.value()])? > 0)
    }

    /// Verifies storage integrity.
    ///
    /// Runs `PRAGMA integrity_check`, then checks that every reservation has
    /// a restriction and that no two reservation-kind restrictions overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integrity`] describing the first violation found.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            return Err(Error::Integrity {
                details: format!("integrity check failed: {result}"),
            });
        }

        let orphans: i64 = self
            .conn
            .query_row(SELECT_ORPHAN_RESERVATIONS, [], |row| row.get(0))?;
        if orphans > 0 {
            return Err(Error::Integrity {
                details: format!("{orphans} reservation(s) without a room restriction"),
            });
        }

        let overlaps: i64 = self
            .conn
            .query_row(SELECT_DOUBLE_BOOKINGS, [], |row| row.get(0))?;
        if overlaps > 0 {
            return Err(Error::Integrity {
                details: format!("{overlaps} overlapping reservation pair(s)"),
            });
        }

        Ok(())
    }
}
