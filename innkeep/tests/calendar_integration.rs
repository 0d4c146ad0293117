//! Calendar display and reconciliation against a real database.

mod common;

use common::{day, reservation, room, TestDb, INN_ROOMS};
use innkeep::calendar::{build_calendar, build_month_map};
use innkeep::database::SnapshotStore;
use innkeep::operations::{reconcile, CalendarForm, ReconcileOptions};
use innkeep::{store_calendar, DayMap, Month, NewRestriction, Repository, SessionCache};

fn july() -> Month {
    Month::new(2024, 7).unwrap()
}

fn block(t: &mut TestDb, room_id: i64, date: &str) -> i64 {
    t.db.insert_restriction(&NewRestriction::block(room(room_id), day(date)).unwrap())
        .unwrap()
        .value()
}

fn blocked_days(t: &TestDb, room_id: i64) -> Vec<String> {
    build_month_map(&t.db, room(room_id), july().first_day(), july().last_day())
        .unwrap()
        .blocks
        .occupied()
        .map(|(d, _)| d.to_string())
        .collect()
}

#[test]
fn test_reservation_drawn_through_checkout_day() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let confirmation = t
        .db
        .insert_reservation_with_restriction(&reservation(1, "2024-07-10", "2024-07-12"))
        .unwrap();
    let id = confirmation.reservation_id.value();

    let maps = build_month_map(&t.db, room(1), july().first_day(), july().last_day()).unwrap();
    assert_eq!(maps.reservations.len(), 31);
    let marked: Vec<_> = maps.reservations.occupied().collect();
    assert_eq!(
        marked,
        vec![
            (day("2024-07-10"), id),
            (day("2024-07-11"), id),
            (day("2024-07-12"), id),
        ]
    );
    assert_eq!(maps.blocks.occupied().count(), 0);
}

#[test]
fn test_block_marks_single_day() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let id = block(&mut t, 1, "2024-07-15");

    let maps = build_month_map(&t.db, room(1), july().first_day(), july().last_day()).unwrap();
    assert_eq!(maps.blocks.occupant(day("2024-07-15")), Some(id));
    assert_eq!(maps.blocks.occupied().count(), 1);
    assert_eq!(maps.reservations.occupied().count(), 0);
}

#[test]
fn test_reservation_spanning_month_edges_is_clipped() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    t.db.insert_reservation_with_restriction(&reservation(1, "2024-06-29", "2024-07-02"))
        .unwrap();

    let maps = build_month_map(&t.db, room(1), july().first_day(), july().last_day()).unwrap();
    let days: Vec<String> = maps.reservations.occupied().map(|(d, _)| d.to_string()).collect();
    assert_eq!(days, vec!["2024-07-01", "2024-07-02"]);
}

#[test]
fn test_checkout_on_first_of_month_not_drawn() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    t.db.insert_reservation_with_restriction(&reservation(1, "2024-06-28", "2024-07-01"))
        .unwrap();

    let maps = build_month_map(&t.db, room(1), july().first_day(), july().last_day()).unwrap();
    assert_eq!(maps.reservations.occupied().count(), 0);
}

#[test]
fn test_materialization_is_deterministic() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    t.db.insert_reservation_with_restriction(&reservation(2, "2024-07-03", "2024-07-06"))
        .unwrap();
    block(&mut t, 2, "2024-07-20");

    let first = build_calendar(&t.db, july()).unwrap();
    let second = build_calendar(&t.db, july()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].room.id(), room(1));
}

#[test]
fn test_reconcile_deletes_only_unkept_blocks() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    block(&mut t, 1, "2024-07-15");
    block(&mut t, 1, "2024-07-20");

    let shown = build_month_map(&t.db, room(1), july().first_day(), july().last_day())
        .unwrap()
        .blocks;
    let form = CalendarForm::from_field_names(["remove_block_1_2024-07-15"]);
    let options = ReconcileOptions::new(july(), form)
        .with_rooms(vec![room(1)])
        .with_previous(room(1), shown);

    let summary = reconcile(&mut t.db, &options).unwrap();
    assert!(summary.is_clean());
    assert_eq!(summary.removed, 1);
    assert_eq!(blocked_days(&t, 1), vec!["2024-07-15"]);
}

#[test]
fn test_stale_map_cannot_remove_a_reservation() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let confirmation = t
        .db
        .insert_reservation_with_restriction(&reservation(1, "2024-07-10", "2024-07-12"))
        .unwrap();

    // A previous map naming the reservation's restriction as if it were a block
    let mut shown = DayMap::empty(july().first_day(), july().last_day());
    shown.mark(day("2024-07-10"), confirmation.restriction_id.value());
    let options = ReconcileOptions::new(july(), CalendarForm::from_field_names(Vec::<String>::new()))
        .with_rooms(vec![room(1)])
        .with_previous(room(1), shown);

    let summary = reconcile(&mut t.db, &options).unwrap();
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.skipped, 1);
    t.db.verify_integrity().unwrap();
    assert!(!t
        .db
        .is_room_free_in_range(room(1), &common::stay("2024-07-10", "2024-07-11"))
        .unwrap());
}

#[test]
fn test_add_block_is_idempotent() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    let form = CalendarForm::edits().add(room(2), day("2024-07-22"));
    let options = ReconcileOptions::new(july(), form);

    let first = reconcile(&mut t.db, &options).unwrap();
    assert_eq!(first.added, 1);

    let second = reconcile(&mut t.db, &options).unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.skipped, 1);
    assert!(second.is_clean());
    assert_eq!(blocked_days(&t, 2), vec!["2024-07-22"]);
}

#[test]
fn test_missing_snapshot_uses_live_blocks() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    block(&mut t, 1, "2024-07-15");
    block(&mut t, 2, "2024-07-16");

    // Room 2 is left unticked without a snapshot, so its block goes
    let form = CalendarForm::from_field_names(["remove_block_1_2024-07-15"]);
    let summary = reconcile(&mut t.db, &ReconcileOptions::new(july(), form)).unwrap();

    assert_eq!(summary.removed, 1);
    assert_eq!(summary.warnings.len(), 2);
    assert_eq!(blocked_days(&t, 1), vec!["2024-07-15"]);
    assert!(blocked_days(&t, 2).is_empty());
}

#[test]
fn test_snapshot_round_trip_through_session() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    block(&mut t, 1, "2024-07-15");
    let rooms = [room(1), room(2)];

    // The admin views the calendar
    let calendars = build_calendar(&t.db, july()).unwrap();
    store_calendar(&SnapshotStore::new(&t.db), "admin", july(), &calendars).unwrap();

    // A block appears after the view; the admin never saw it
    block(&mut t, 1, "2024-07-18");

    let form = CalendarForm::edits().remove(room(1), day("2024-07-15"));
    let options = {
        let store = SnapshotStore::new(&t.db);
        ReconcileOptions::new(july(), form)
            .with_session_snapshots(&store, "admin", &rooms)
            .unwrap()
    };
    let summary = reconcile(&mut t.db, &options).unwrap();

    assert!(summary.warnings.is_empty());
    assert_eq!(summary.removed, 1);
    assert_eq!(blocked_days(&t, 1), vec!["2024-07-18"]);

    assert_eq!(SnapshotStore::new(&t.db).clear("admin").unwrap(), 2);
}

#[test]
fn test_dry_run_leaves_blocks_in_place() {
    let mut t = TestDb::with_rooms(INN_ROOMS);
    block(&mut t, 1, "2024-07-15");

    let options = ReconcileOptions::new(july(), CalendarForm::new()).with_dry_run(true);
    let summary = reconcile(&mut t.db, &options).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.actions.len(), 1);
    assert_eq!(blocked_days(&t, 1), vec!["2024-07-15"]);
}
