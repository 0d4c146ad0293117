//! Per-session storage of previously rendered block maps.
//!
//! The calendar reconciler diffs an admin's submitted edits against the
//! block maps that admin was shown. Those maps are kept here, keyed by
//! session, room and month, and expire after a TTL.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::calendar::{DayMap, Month, RoomCalendar};
use crate::error::Result;
use crate::RoomId;

/// Default lifetime of a stored block map.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Storage of block maps per session.
pub trait SessionCache {
    /// Stores the block map shown to `session` for a room and month,
    /// replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be persisted.
    fn store_blocks(&self, session: &str, room_id: RoomId, month: Month, blocks: &DayMap)
        -> Result<()>;

    /// Loads a stored, unexpired block map.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn load_blocks(&self, session: &str, room_id: RoomId, month: Month) -> Result<Option<DayMap>>;

    /// Drops everything stored for `session`, returning the number of maps
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    fn clear(&self, session: &str) -> Result<usize>;
}

/// Stores the block maps of a rendered calendar for `session`.
///
/// # Errors
///
/// Returns the first storage error; maps stored before it are kept.
pub fn store_calendar<C: SessionCache + ?Sized>(
    cache: &C,
    session: &str,
    month: Month,
    calendars: &[RoomCalendar],
) -> Result<()> {
    for calendar in calendars {
        cache.store_blocks(session, calendar.room.id(), month, &calendar.maps.blocks)?;
    }
    log::debug!("stored {} block map(s) for session {session} in {month}", calendars.len());
    Ok(())
}

type SnapshotKey = (String, RoomId, Month);

/// In-memory session cache for long-lived processes.
///
/// Safe to share between threads.
///
/// # Examples
///
/// ```
/// use innkeep::{DayMap, MemorySessionCache, Month, RoomId, SessionCache};
///
/// let cache = MemorySessionCache::new();
/// let month = Month::new(2024, 7).unwrap();
/// let room = RoomId::try_from(1).unwrap();
/// let blocks = DayMap::empty(month.first_day(), month.last_day());
///
/// cache.store_blocks("admin-1", room, month, &blocks).unwrap();
/// assert_eq!(cache.load_blocks("admin-1", room, month).unwrap(), Some(blocks));
/// assert_eq!(cache.load_blocks("admin-2", room, month).unwrap(), None);
/// ```
#[derive(Debug)]
pub struct MemorySessionCache {
    /// `None` expiry means the TTL is too long to represent; never expires.
    entries: DashMap<SnapshotKey, (DayMap, Option<Instant>)>,
    ttl: Duration,
}

impl MemorySessionCache {
    /// Creates a cache with [`DEFAULT_SESSION_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Creates a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Removes expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, (_, expires)| is_live(*expires, now));
        before - self.entries.len()
    }

    /// Returns the number of stored maps, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_live(expires: Option<Instant>, now: Instant) -> bool {
    expires.map_or(true, |expires| expires > now)
}

impl Default for MemorySessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache for MemorySessionCache {
    fn store_blocks(
        &self,
        session: &str,
        room_id: RoomId,
        month: Month,
        blocks: &DayMap,
    ) -> Result<()> {
        let expires = Instant::now().checked_add(self.ttl);
        self.entries
            .insert((session.to_string(), room_id, month), (blocks.clone(), expires));
        Ok(())
    }

    fn load_blocks(&self, session: &str, room_id: RoomId, month: Month) -> Result<Option<DayMap>> {
        let key = (session.to_string(), room_id, month);
        let now = Instant::now();
        let found = self
            .entries
            .get(&key)
            .map(|entry| (entry.0.clone(), is_live(entry.1, now)));
        match found {
            Some((blocks, true)) => Ok(Some(blocks)),
            Some((_, false)) => {
                self.entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn clear(&self, session: &str) -> Result<usize> {
        let before = self.entries.len();
        self.entries.retain(|(owner, _, _), _| owner != session);
        Ok(before - self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::parse_date;
    use std::sync::Arc;
    use std::thread;

    fn month() -> Month {
        Month::new(2024, 7).unwrap()
    }

    fn blocks_with(day: &str, id: i64) -> DayMap {
        let mut map = DayMap::empty(month().first_day(), month().last_day());
        map.mark(parse_date(day).unwrap(), id);
        map
    }

    #[test]
    fn test_store_replaces() {
        let cache = MemorySessionCache::new();
        let room = RoomId::try_from(1).unwrap();
        cache.store_blocks("s", room, month(), &blocks_with("2024-07-15", 42)).unwrap();
        cache.store_blocks("s", room, month(), &blocks_with("2024-07-20", 43)).unwrap();

        let loaded = cache.load_blocks("s", room, month()).unwrap().unwrap();
        assert_eq!(loaded.occupied().collect::<Vec<_>>(), vec![(parse_date("2024-07-20").unwrap(), 43)]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_not_returned() {
        let cache = MemorySessionCache::with_ttl(Duration::ZERO);
        let room = RoomId::try_from(1).unwrap();
        cache.store_blocks("s", room, month(), &blocks_with("2024-07-15", 42)).unwrap();

        assert_eq!(cache.load_blocks("s", room, month()).unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unbounded_ttl_never_expires() {
        let cache = MemorySessionCache::with_ttl(Duration::MAX);
        let room = RoomId::try_from(1).unwrap();
        cache.store_blocks("s", room, month(), &blocks_with("2024-07-15", 42)).unwrap();

        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(
            cache.load_blocks("s", room, month()).unwrap(),
            Some(blocks_with("2024-07-15", 42))
        );
    }

    #[test]
    fn test_purge_expired() {
        let cache = MemorySessionCache::with_ttl(Duration::ZERO);
        let room = RoomId::try_from(1).unwrap();
        cache.store_blocks("a", room, month(), &blocks_with("2024-07-15", 1)).unwrap();
        cache.store_blocks("b", room, month(), &blocks_with("2024-07-15", 2)).unwrap();
        assert_eq!(cache.purge_expired(), 2);
    }

    #[test]
    fn test_clear_only_touches_one_session() {
        let cache = MemorySessionCache::new();
        let room = RoomId::try_from(1).unwrap();
        let other = RoomId::try_from(2).unwrap();
        cache.store_blocks("a", room, month(), &blocks_with("2024-07-15", 1)).unwrap();
        cache.store_blocks("a", other, month(), &blocks_with("2024-07-16", 2)).unwrap();
        cache.store_blocks("b", room, month(), &blocks_with("2024-07-17", 3)).unwrap();

        assert_eq!(cache.clear("a").unwrap(), 2);
        assert!(cache.load_blocks("b", room, month()).unwrap().is_some());
    }

    #[test]
    fn test_store_calendar_keeps_block_maps() {
        use crate::calendar::MonthMaps;
        use crate::Room;

        let cache = MemorySessionCache::new();
        let calendars: Vec<RoomCalendar> = [(1, "2024-07-15", 42), (2, "2024-07-20", 43)]
            .into_iter()
            .map(|(id, day, block)| {
                let room_id = RoomId::try_from(id).unwrap();
                RoomCalendar {
                    room: Room::new(room_id, format!("Room {id}")),
                    maps: MonthMaps {
                        room_id,
                        reservations: DayMap::empty(month().first_day(), month().last_day()),
                        blocks: blocks_with(day, block),
                    },
                }
            })
            .collect();

        store_calendar(&cache, "admin", month(), &calendars).unwrap();
        assert_eq!(cache.len(), 2);
        let room = RoomId::try_from(2).unwrap();
        let loaded = cache.load_blocks("admin", room, month()).unwrap().unwrap();
        assert_eq!(loaded.occupant(parse_date("2024-07-20").unwrap()), Some(43));
    }

    #[test]
    fn test_concurrent_sessions() {
        let cache = Arc::new(MemorySessionCache::new());
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let room = RoomId::try_from(i).unwrap();
                    let session = format!("session-{i}");
                    cache
                        .store_blocks(&session, room, month(), &blocks_with("2024-07-01", i))
                        .unwrap();
                    cache.load_blocks(&session, room, month()).unwrap().unwrap()
                })
            })
            .collect();

        for (i, handle) in (1..=8).zip(handles) {
            let blocks = handle.join().unwrap();
            assert_eq!(blocks.occupant(parse_date("2024-07-01").unwrap()), Some(i));
        }
        assert_eq!(cache.len(), 8);
    }
}
