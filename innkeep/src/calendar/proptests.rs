//! Property-based tests for month materialization.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use super::{build_month_map, Month};
use crate::repository::MockRepository;
use crate::reservation::ReservationId;
use crate::restriction::{RestrictionId, RestrictionKind, RoomRestriction};
use crate::{Room, RoomId, Stay};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

// Restrictions somewhere in June..August 2024
fn restriction_strategy() -> impl Strategy<Value = RoomRestriction> {
    (0u64..90, 1u64..10, any::<bool>(), 1i64..1000).prop_map(|(offset, nights, is_block, id)| {
        let start = base() + Days::new(offset);
        let (span, kind) = if is_block {
            (Stay::single_day(start).unwrap(), RestrictionKind::Block)
        } else {
            (
                Stay::new(start, start + Days::new(nights)).unwrap(),
                RestrictionKind::Reservation(ReservationId::new(id)),
            )
        };
        RoomRestriction {
            id: RestrictionId::new(id),
            room_id: RoomId::try_from(1).unwrap(),
            span,
            kind,
        }
    })
}

fn repo_with(restrictions: Vec<RoomRestriction>) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.expect_get_room()
        .returning(|id| Ok(Some(Room::new(id, "Room"))));
    repo.expect_restrictions_for_room_in_range()
        .returning(move |_, first, last| {
            Ok(restrictions
                .iter()
                .filter(|r| r.span.end() > first && r.span.start() <= last)
                .copied()
                .collect())
        });
    repo
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Both maps cover exactly the days of the month
    #[test]
    fn maps_cover_exactly_the_month(
        restrictions in prop::collection::vec(restriction_strategy(), 0..8),
        month_offset in 0u32..3,
    ) {
        let month = Month::new(2024, 6 + month_offset).unwrap();
        let repo = repo_with(restrictions);
        let maps = build_month_map(&repo, RoomId::try_from(1).unwrap(), month.first_day(), month.last_day()).unwrap();

        let days: Vec<_> = month.days().collect();
        prop_assert_eq!(maps.reservations.iter().map(|(d, _)| d).collect::<Vec<_>>(), days.clone());
        prop_assert_eq!(maps.blocks.iter().map(|(d, _)| d).collect::<Vec<_>>(), days);
    }

    // Every marked block day is the start of some block
    #[test]
    fn block_days_are_block_starts(
        restrictions in prop::collection::vec(restriction_strategy(), 0..8),
    ) {
        let month = Month::new(2024, 7).unwrap();
        let repo = repo_with(restrictions.clone());
        let maps = build_month_map(&repo, RoomId::try_from(1).unwrap(), month.first_day(), month.last_day()).unwrap();

        for (day, id) in maps.blocks.occupied() {
            prop_assert!(restrictions.iter().any(|r| r.kind.is_block()
                && r.span.start() == day
                && r.id.value() == id));
        }
    }

    // Every reserved day lies within the inclusive span of a reservation
    #[test]
    fn reserved_days_within_inclusive_span(
        restrictions in prop::collection::vec(restriction_strategy(), 0..8),
    ) {
        let month = Month::new(2024, 7).unwrap();
        let repo = repo_with(restrictions.clone());
        let maps = build_month_map(&repo, RoomId::try_from(1).unwrap(), month.first_day(), month.last_day()).unwrap();

        for (day, id) in maps.reservations.occupied() {
            prop_assert!(restrictions.iter().any(|r| r.kind.reservation_id() == Some(ReservationId::new(id))
                && r.span.start() <= day
                && day <= r.span.end()));
        }
    }

    // Materializing twice without writes yields identical maps
    #[test]
    fn materialization_is_deterministic(
        restrictions in prop::collection::vec(restriction_strategy(), 0..8),
    ) {
        let month = Month::new(2024, 7).unwrap();
        let repo = repo_with(restrictions);
        let room = RoomId::try_from(1).unwrap();
        let first = build_month_map(&repo, room, month.first_day(), month.last_day()).unwrap();
        let second = build_month_map(&repo, room, month.first_day(), month.last_day()).unwrap();
        prop_assert_eq!(first, second);
    }
}
