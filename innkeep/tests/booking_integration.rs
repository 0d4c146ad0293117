//! Reservation writing and administration against a real database.

mod common;

use common::{day, guest, room, stay, TestDb, INN_ROOMS};
use innkeep::operations::{
    delete_reservation, get_reservation, reserve, set_processed, update_guest, PlanExecutor,
    ReserveOptions, ReservePlan,
};
use innkeep::{Database, Error, GuestContact, NewRestriction, Repository, RestrictionKind};

fn options(room_id: i64, start: &str, end: &str) -> ReserveOptions {
    ReserveOptions::new(room(room_id), stay(start, end), guest())
}

#[test]
fn test_reservation_and_restriction_written_together() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let confirmation = reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();

    let stored = get_reservation(&t.db, confirmation.reservation_id).unwrap();
    assert_eq!(stored.stay(), stay("2024-07-01", "2024-07-05"));
    assert!(!stored.processed());

    let restrictions = t
        .db
        .restrictions_for_room_in_range(room(1), day("2024-07-01"), day("2024-07-31"))
        .unwrap();
    assert_eq!(restrictions.len(), 1);
    assert_eq!(restrictions[0].id, confirmation.restriction_id);
    assert_eq!(
        restrictions[0].kind,
        RestrictionKind::Reservation(confirmation.reservation_id)
    );
}

#[test]
fn test_second_booking_for_same_nights_conflicts() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();

    let err = reserve(&mut t.db, options(1, "2024-07-03", "2024-07-08")).unwrap_err();
    assert!(err.is_conflict());

    // The other room is unaffected
    reserve(&mut t.db, options(2, "2024-07-03", "2024-07-08")).unwrap();
    assert_eq!(Database::list_reservations(t.db.connection()).unwrap().len(), 2);
}

#[test]
fn test_stale_plan_fails_at_execution() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let plan = ReservePlan::new(options(1, "2024-07-01", "2024-07-05"))
        .build_plan(&t.db)
        .unwrap();

    // Someone else books in between planning and execution
    reserve(&mut t.db, options(1, "2024-07-04", "2024-07-06")).unwrap();

    let err = PlanExecutor::new(&mut t.db).execute(&plan).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(Database::list_reservations(t.db.connection()).unwrap().len(), 1);
}

#[test]
fn test_blocked_day_refuses_booking() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    t.db.insert_restriction(&NewRestriction::block(room(1), day("2024-07-03")).unwrap())
        .unwrap();

    let err = reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_trigger_rejects_raw_double_booking() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let first = reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();

    // Bypass the engine and insert an overlapping reservation restriction
    let err = t
        .db
        .insert_restriction(&NewRestriction::for_reservation(
            room(1),
            stay("2024-07-02", "2024-07-03"),
            first.reservation_id,
        ))
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_unknown_room_is_validation_error() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let err = reserve(&mut t.db, options(42, "2024-07-01", "2024-07-05")).unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "room_id"));
}

#[test]
fn test_admin_lifecycle() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let id = reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05"))
        .unwrap()
        .reservation_id;

    assert_eq!(Database::list_new_reservations(t.db.connection()).unwrap().len(), 1);
    set_processed(&mut t.db, id, true).unwrap();
    assert!(Database::list_new_reservations(t.db.connection()).unwrap().is_empty());

    let contact = GuestContact::new("Ada", "Lovelace", "ada@example.com", "555-0199").unwrap();
    let updated = update_guest(&mut t.db, id, contact).unwrap();
    assert_eq!(updated.guest().email(), "ada@example.com");
    assert!(updated.processed());

    delete_reservation(&mut t.db, id).unwrap();
    assert!(Database::list_reservations(t.db.connection()).unwrap().is_empty());
    // Cascade freed the nights
    reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();
}

#[test]
fn test_reservations_listed_latest_stay_first() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();
    reserve(&mut t.db, options(1, "2024-08-01", "2024-08-03")).unwrap();
    reserve(&mut t.db, options(2, "2024-06-01", "2024-06-03")).unwrap();

    let starts: Vec<String> = Database::list_reservations(t.db.connection())
        .unwrap()
        .iter()
        .map(|r| r.stay().start().to_string())
        .collect();
    assert_eq!(starts, vec!["2024-08-01", "2024-07-01", "2024-06-01"]);
}

#[test]
fn test_integrity_holds_after_bookings() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    reserve(&mut t.db, options(1, "2024-07-01", "2024-07-05")).unwrap();
    reserve(&mut t.db, options(1, "2024-07-05", "2024-07-09")).unwrap();
    t.db.verify_integrity().unwrap();
}
