//! Property-based tests for `Stay`.

use super::Stay;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// Stays within a two-year window, one to thirty nights long
fn stay_strategy() -> impl Strategy<Value = Stay> {
    (0u64..730, 1u64..=30).prop_map(|(offset, nights)| {
        let start = base() + Days::new(offset);
        Stay::new(start, start + Days::new(nights)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Two stays overlap iff they share a night
    #[test]
    fn overlap_iff_shared_night(a in stay_strategy(), b in stay_strategy()) {
        let shared = a.nights_iter().any(|night| b.contains(night));
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    // A stay never overlaps the stay starting on its checkout day
    #[test]
    fn back_to_back_never_overlap(a in stay_strategy(), nights in 1u64..=30) {
        let next = Stay::new(a.end(), a.end() + Days::new(nights)).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(!next.overlaps(&a));
    }

    // Night count matches iteration
    #[test]
    fn nights_match_iteration(a in stay_strategy()) {
        let counted = i64::try_from(a.nights_iter().count()).unwrap();
        prop_assert_eq!(a.nights(), counted);
    }

    // Inverted or empty ranges are rejected
    #[test]
    fn inverted_rejected(offset in 0u64..730, back in 0u64..=30) {
        let end = base() + Days::new(offset);
        let start = end + Days::new(back);
        prop_assert!(Stay::new(start, end).is_err());
    }

    // Display form parses back to the same stay
    #[test]
    fn display_parses_back(a in stay_strategy()) {
        let text = a.to_string();
        let (start, end) = text.split_once("..").unwrap();
        prop_assert_eq!(Stay::parse(start, end).unwrap(), a);
    }
}
