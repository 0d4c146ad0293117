//! Day-occupancy maps.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day occupant ids for one room over a range of days.
///
/// Every day in the range has an entry; `0` means free. Serializes as a JSON
/// object from ISO date to id.
///
/// # Examples
///
/// ```
/// use innkeep::DayMap;
/// use innkeep::stay::parse_date;
///
/// let first = parse_date("2024-07-01").unwrap();
/// let last = parse_date("2024-07-03").unwrap();
/// let mut map = DayMap::empty(first, last);
/// map.mark(parse_date("2024-07-02").unwrap(), 42);
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.occupant(first), Some(0));
/// assert_eq!(map.occupied().collect::<Vec<_>>(), vec![(parse_date("2024-07-02").unwrap(), 42)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMap(BTreeMap<NaiveDate, i64>);

impl DayMap {
    /// Creates a map with every day of `[first, last]` set to free.
    ///
    /// An inverted range yields an empty map.
    #[must_use]
    pub fn empty(first: NaiveDate, last: NaiveDate) -> Self {
        Self(
            first
                .iter_days()
                .take_while(|d| *d <= last)
                .map(|d| (d, 0))
                .collect(),
        )
    }

    /// Sets the occupant of `day`, returning `false` if the day lies
    /// outside the map's range.
    pub fn mark(&mut self, day: NaiveDate, id: i64) -> bool {
        match self.0.get_mut(&day) {
            Some(slot) => {
                *slot = id;
                true
            }
            None => false,
        }
    }

    /// Returns the occupant of `day` (`0` if free), or `None` outside the
    /// map's range.
    #[must_use]
    pub fn occupant(&self, day: NaiveDate) -> Option<i64> {
        self.0.get(&day).copied()
    }

    /// Iterates the occupied days in date order.
    pub fn occupied(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.0
            .iter()
            .filter(|(_, id)| **id != 0)
            .map(|(day, id)| (*day, *id))
    }

    /// Iterates every day with its occupant.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.0.iter().map(|(day, id)| (*day, *id))
    }

    /// Returns the number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map covers no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::parse_date;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_empty_covers_inclusive_range() {
        let map = DayMap::empty(day("2024-07-01"), day("2024-07-31"));
        assert_eq!(map.len(), 31);
        assert_eq!(map.occupied().count(), 0);
        assert_eq!(map.occupant(day("2024-08-01")), None);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let map = DayMap::empty(day("2024-07-05"), day("2024-07-01"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_mark_outside_range() {
        let mut map = DayMap::empty(day("2024-07-01"), day("2024-07-02"));
        assert!(!map.mark(day("2024-07-03"), 5));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut map = DayMap::empty(day("2024-07-01"), day("2024-07-02"));
        map.mark(day("2024-07-02"), 7);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-07-01":0,"2024-07-02":7}"#);

        let back: DayMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
