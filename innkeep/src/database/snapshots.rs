//! Session cache backed by the `calendar_snapshots` table.
//!
//! Short-lived processes (one CLI invocation per request) cannot keep block
//! maps in memory between the calendar view and the edit submission, so
//! they persist them next to the booking data.

use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::calendar::{DayMap, Month};
use crate::error::{Error, Result};
use crate::session::{SessionCache, DEFAULT_SESSION_TTL};
use crate::RoomId;

use super::connection::Database;

const UPSERT_SNAPSHOT: &str = r"
    INSERT OR REPLACE INTO calendar_snapshots (session, room_id, month, blocks, expires_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const SELECT_SNAPSHOT: &str = r"
    SELECT blocks FROM calendar_snapshots
    WHERE session = ?1 AND room_id = ?2 AND month = ?3 AND expires_at > ?4
";

const DELETE_EXPIRED_SNAPSHOTS: &str = "DELETE FROM calendar_snapshots WHERE expires_at <= ?1";

const DELETE_SESSION_SNAPSHOTS: &str = "DELETE FROM calendar_snapshots WHERE session = ?1";

/// A [`SessionCache`] view over a [`Database`].
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig, SnapshotStore};
/// use innkeep::{DayMap, Month, RoomId, SessionCache};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let store = SnapshotStore::new(&db);
/// let month = Month::new(2024, 7).unwrap();
/// let room = RoomId::try_from(1).unwrap();
/// store
///     .store_blocks("admin", room, month, &DayMap::empty(month.first_day(), month.last_day()))
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct SnapshotStore<'a> {
    db: &'a Database,
    ttl: Duration,
}

impl<'a> SnapshotStore<'a> {
    /// Creates a store with [`DEFAULT_SESSION_TTL`].
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            db,
            ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Sets the lifetime of stored maps.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Deletes expired snapshots, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_expired(&self) -> Result<usize> {
        Ok(self
            .db
            .conn
            .execute(DELETE_EXPIRED_SNAPSHOTS, [Utc::now().timestamp()])?)
    }
}

impl SessionCache for SnapshotStore<'_> {
    fn store_blocks(
        &self,
        session: &str,
        room_id: RoomId,
        month: Month,
        blocks: &DayMap,
    ) -> Result<()> {
        let json = serde_json::to_string(blocks).map_err(|e| Error::Validation {
            field: "blocks".into(),
            message: format!("cannot serialize block map: {e}"),
        })?;
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp().saturating_add(ttl_secs);

        self.purge_expired()?;
        self.db.conn.execute(
            UPSERT_SNAPSHOT,
            params![session, room_id.value(), month.to_string(), json, expires_at],
        )?;
        Ok(())
    }

    fn load_blocks(&self, session: &str, room_id: RoomId, month: Month) -> Result<Option<DayMap>> {
        let json: Option<String> = self
            .db
            .conn
            .query_row(
                SELECT_SNAPSHOT,
                params![session, room_id.value(), month.to_string(), Utc::now().timestamp()],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|json| {
            serde_json::from_str(&json).map_err(|e| Error::Integrity {
                details: format!("corrupt calendar snapshot for room {room_id}: {e}"),
            })
        })
        .transpose()
    }

    fn clear(&self, session: &str) -> Result<usize> {
        Ok(self.db.conn.execute(DELETE_SESSION_SNAPSHOTS, [session])?)
    }
}
