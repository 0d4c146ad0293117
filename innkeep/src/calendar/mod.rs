//! Calendar materialization.
//!
//! Builds per-room, per-day occupancy maps for the admin calendar. Two maps
//! are kept per room: reservation days carry the reservation id, block days
//! carry the block restriction's id. `0` means free.
//!
//! Reservations are drawn over `[start, end]` inclusive, so the checkout day
//! shows as occupied. This is a display convention only; availability uses
//! half-open ranges.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::calendar::build_calendar;
//! use innkeep::{Database, DatabaseConfig, Month};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let month: Month = "2024-07".parse().unwrap();
//! for calendar in build_calendar(&db, month).unwrap() {
//!     println!("{}: {} blocked days", calendar.room, calendar.maps.blocks.occupied().count());
//! }
//! ```

mod day_map;
mod month;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use chrono::{Days, NaiveDate};
use serde::Serialize;

pub use day_map::DayMap;
pub use month::Month;

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::restriction::RestrictionKind;
use crate::{Room, RoomId};

/// Occupancy of one room over a range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthMaps {
    /// The room.
    pub room_id: RoomId,
    /// Day to reservation id.
    pub reservations: DayMap,
    /// Day to block restriction id.
    pub blocks: DayMap,
}

/// A room together with its occupancy for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCalendar {
    /// The room.
    pub room: Room,
    /// Its occupancy maps.
    pub maps: MonthMaps,
}

/// Builds the occupancy maps of one room over the inclusive range
/// `[first, last]`.
///
/// Every day in the range is present in both maps. Reservation-kind
/// restrictions mark `[start, end]` inclusive; blocks mark their start day
/// only. Days outside the range are never written.
///
/// Restrictions are fetched by half-open intersection with the range, so a
/// stay whose checkout falls on `first` is not drawn there even though its
/// checkout day is drawn when it lies inside the range.
///
/// # Errors
///
/// Returns a validation error if `first > last` or the room does not exist,
/// or a storage error if restrictions cannot be read.
pub fn build_month_map<R: Repository + ?Sized>(
    repo: &R,
    room_id: RoomId,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<MonthMaps> {
    check_range(first, last)?;
    if repo.get_room(room_id)?.is_none() {
        return Err(Error::Validation {
            field: "room_id".into(),
            message: format!("room {room_id} does not exist"),
        });
    }
    materialize(repo, room_id, first, last)
}

/// Builds the month's occupancy maps for every room, ordered by room id.
///
/// # Errors
///
/// Returns a storage error if rooms or restrictions cannot be read.
pub fn build_calendar<R: Repository + ?Sized>(repo: &R, month: Month) -> Result<Vec<RoomCalendar>> {
    let (first, last) = (month.first_day(), month.last_day());
    repo.list_all_rooms()?
        .into_iter()
        .map(|room| {
            let maps = materialize(repo, room.id(), first, last)?;
            Ok(RoomCalendar { room, maps })
        })
        .collect()
}

fn check_range(first: NaiveDate, last: NaiveDate) -> Result<()> {
    if first > last {
        return Err(Error::InvalidStay {
            start: first.to_string(),
            end: last.to_string(),
            reason: "first day must not be after last day".into(),
        });
    }
    Ok(())
}

pub(crate) fn materialize<R: Repository + ?Sized>(
    repo: &R,
    room_id: RoomId,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<MonthMaps> {
    let mut reservations = DayMap::empty(first, last);
    let mut blocks = DayMap::empty(first, last);

    for restriction in repo.restrictions_for_room_in_range(room_id, first, last)? {
        match restriction.kind {
            RestrictionKind::Reservation(reservation_id) => {
                // Checkout day included
                let from = restriction.span.start().max(first);
                let to = restriction.span.end().min(last);
                let mut day = from;
                while day <= to {
                    reservations.mark(day, reservation_id.value());
                    match day.checked_add_days(Days::new(1)) {
                        Some(next) => day = next,
                        None => break,
                    }
                }
            }
            RestrictionKind::Block => {
                blocks.mark(restriction.span.start(), restriction.id.value());
            }
        }
    }

    log::debug!(
        "materialized room {room_id} {first}..={last}: {} reserved, {} blocked",
        reservations.occupied().count(),
        blocks.occupied().count()
    );

    Ok(MonthMaps {
        room_id,
        reservations,
        blocks,
    })
}
