//! Concurrent booking attempts against one database file.
//!
//! Each thread opens its own connection, the way separate processes would.
//! Availability is re-checked inside an IMMEDIATE transaction, so exactly
//! one writer wins any given night.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use common::{guest, room, stay, TestDb, INN_ROOMS};
use innkeep::database::{Database, DatabaseConfig};
use innkeep::operations::{reserve, ReserveOptions};
use innkeep::{ErrorCategory, Result};

const WRITERS: usize = 8;

fn race(path: &std::path::Path, requests: Vec<(i64, &'static str, &'static str)>) -> Vec<Result<()>> {
    let barrier = Arc::new(Barrier::new(requests.len()));
    let handles: Vec<_> = requests
        .into_iter()
        .map(|(room_id, start, end)| {
            let path = path.to_path_buf();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let config = DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(30));
                let mut db = Database::open(config)?;
                barrier.wait();
                reserve(&mut db, ReserveOptions::new(room(room_id), stay(start, end), guest()))
                    .map(|_| ())
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn test_same_stay_booked_exactly_once() {
    let t = TestDb::with_rooms(INN_ROOMS);
    let results = race(&t.path(), vec![(1, "2024-07-01", "2024-07-05"); WRITERS]);

    let won = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(won, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.category(), ErrorCategory::Conflict, "unexpected error: {err}");
    }

    assert_eq!(Database::list_reservations(t.db.connection()).unwrap().len(), 1);
    t.db.verify_integrity().unwrap();
}

#[test]
fn test_overlapping_stays_booked_at_most_once() {
    let t = TestDb::with_rooms(INN_ROOMS);
    let results = race(
        &t.path(),
        vec![
            (1, "2024-07-01", "2024-07-05"),
            (1, "2024-07-04", "2024-07-08"),
            (1, "2024-07-02", "2024-07-05"),
            (1, "2024-06-28", "2024-07-05"),
        ],
    );

    // All four want the night of the 4th
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    t.db.verify_integrity().unwrap();
}

#[test]
fn test_disjoint_bookings_all_succeed() {
    let t = TestDb::with_rooms(INN_ROOMS);
    let results = race(
        &t.path(),
        vec![
            (1, "2024-07-01", "2024-07-05"),
            (1, "2024-07-05", "2024-07-08"),
            (2, "2024-07-01", "2024-07-05"),
            (2, "2024-07-10", "2024-07-12"),
        ],
    );

    for result in &results {
        assert!(result.is_ok(), "booking failed: {result:?}");
    }
    assert_eq!(Database::list_reservations(t.db.connection()).unwrap().len(), 4);
}
