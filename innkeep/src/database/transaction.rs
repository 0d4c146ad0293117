//! Transaction management utilities.
//!
//! This module provides transaction helpers for multi-statement writes.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::Result;
use crate::Room;

use super::connection::Database;
use super::operations::classify_error;

impl Database {
    /// Runs `f` inside an `IMMEDIATE` transaction.
    ///
    /// The write lock is taken up front, so reads performed by `f` cannot be
    /// invalidated by another writer before commit. The transaction commits
    /// if `f` succeeds and rolls back otherwise; storage errors are mapped
    /// to conflicts or lock timeouts where applicable.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or an error if the transaction cannot be
    /// started or committed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    /// use innkeep::{Room, RoomId};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let room = Room::new(RoomId::try_from(1).unwrap(), "Attic");
    /// db.with_immediate_transaction(|tx| Database::insert_room_simple(tx, &room))
    ///     .unwrap();
    /// ```
    pub fn with_immediate_transaction<T>(
        &mut self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let timeout = self.busy_timeout();
        let run = |conn: &mut Connection| -> Result<T> {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        };
        run(&mut self.conn).map_err(|e| classify_error(e, timeout))
    }

    /// Inserts multiple rooms in a single transaction.
    ///
    /// This operation is atomic - either all rooms are inserted or none
    /// are.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if any room id already exists, or
    /// a validation error for a blank name.
    pub fn batch_insert_rooms(&mut self, rooms: &[Room]) -> Result<()> {
        self.with_immediate_transaction(|tx| {
            for room in rooms {
                Self::insert_room_simple(tx, room)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::RoomId;

    fn room(id: i64, name: &str) -> Room {
        Room::new(RoomId::try_from(id).unwrap(), name)
    }

    #[test]
    fn test_batch_insert_rooms() {
        let mut db = create_test_database();
        db.batch_insert_rooms(&[room(1, "A"), room(2, "B"), room(3, "C")])
            .unwrap();

        let all = Database::list_rooms(db.connection()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_batch_insert_empty() {
        let mut db = create_test_database();
        db.batch_insert_rooms(&[]).unwrap();
        assert!(Database::list_rooms(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_batch_insert_rolls_back_on_duplicate() {
        let mut db = create_test_database();
        let err = db
            .batch_insert_rooms(&[room(1, "A"), room(2, "B"), room(1, "again")])
            .unwrap_err();
        assert!(err.is_conflict());

        assert!(Database::list_rooms(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_transaction_rolls_back_on_closure_error() {
        let mut db = create_test_database();
        let result: Result<()> = db.with_immediate_transaction(|tx| {
            Database::insert_room_simple(tx, &room(1, "A"))?;
            Err(crate::Error::Validation {
                field: "test".into(),
                message: "abort".into(),
            })
        });
        assert!(result.is_err());
        assert!(Database::list_rooms(db.connection()).unwrap().is_empty());
    }
}
