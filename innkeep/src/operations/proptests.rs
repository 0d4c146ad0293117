//! Property-based tests for operations module.
//!
//! These tests focus on the reconciliation diff and the calendar form
//! convention.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use proptest::prelude::*;

use super::{add_field_name, keep_field_name, reconcile, CalendarForm, ReconcileOptions};
use crate::repository::MockRepository;
use crate::restriction::RestrictionId;
use crate::{DayMap, Month, RoomId};

fn july() -> Month {
    Month::new(2024, 7).unwrap()
}

fn july_day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

// Blocked July days, each paired with whether the admin kept it
fn shown_strategy() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::btree_map(1u32..=31, any::<bool>(), 0..12)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // Exactly the shown blocks without a keep marker are deleted
    #[test]
    fn deletes_exactly_unkept_blocks(shown in shown_strategy()) {
        let room = RoomId::try_from(1).unwrap();
        let mut blocks = DayMap::empty(july().first_day(), july().last_day());
        let mut fields = Vec::new();
        let mut expected = BTreeSet::new();
        for &(d, kept) in &shown {
            let id = i64::from(d) + 100;
            blocks.mark(july_day(d), id);
            if kept {
                fields.push(keep_field_name(room, july_day(d)));
            } else {
                expected.insert(id);
            }
        }

        let deleted = Arc::new(Mutex::new(BTreeSet::new()));
        let sink = Arc::clone(&deleted);
        let mut repo = MockRepository::new();
        repo.expect_delete_restriction().returning(move |id: RestrictionId| {
            sink.lock().unwrap().insert(id.value());
            Ok(true)
        });
        repo.expect_insert_restriction().never();

        let options = ReconcileOptions::new(july(), CalendarForm::from_field_names(fields))
            .with_rooms(vec![room])
            .with_previous(room, blocks);
        let summary = reconcile(&mut repo, &options).unwrap();

        prop_assert_eq!(summary.removed, expected.len());
        prop_assert_eq!(&*deleted.lock().unwrap(), &expected);
    }

    // Generated field names always parse back to the same room and day
    #[test]
    fn field_names_parse_back(room in 1i64..10_000, d in 1u32..=31) {
        let room = RoomId::try_from(room).unwrap();
        let day = july_day(d);
        let form = CalendarForm::from_field_names([
            keep_field_name(room, day),
            add_field_name(room, day),
        ]);

        prop_assert!(form.keeps(room, day));
        prop_assert!(form.additions().contains(&(room, day)));
        prop_assert!(form.parse_failures().is_empty());
    }

    // Unrelated field names never change the parsed form
    #[test]
    fn unrelated_fields_ignored(name in "[a-z_]{0,20}") {
        prop_assume!(!name.starts_with("add_block_") && !name.starts_with("remove_block_"));
        let form = CalendarForm::from_field_names([name]);
        prop_assert_eq!(form, CalendarForm::new());
    }
}
