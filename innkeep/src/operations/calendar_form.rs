//! Parsing of submitted calendar edits.
//!
//! The admin calendar posts one field per checkbox. A block the admin was
//! shown carries a `remove_block_{room}_{date}` checkbox that is checked
//! while the block should stay, so an absent field means "remove". A free
//! day carries an `add_block_{room}_{date}` checkbox that is checked to add
//! a block. Field values are ignored; only names matter.
//!
//! [`CalendarForm`] turns those names into explicit sets. Callers without a
//! posted form (the CLI) build one from explicit removals instead.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::stay::parse_date;
use crate::RoomId;

/// Field name prefix marking a shown block as kept.
pub const KEEP_BLOCK_PREFIX: &str = "remove_block_";

/// Field name prefix requesting a new block.
pub const ADD_BLOCK_PREFIX: &str = "add_block_";

/// A room and one of its days.
pub type RoomDay = (RoomId, NaiveDate);

/// A form field that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldParseFailure {
    /// The raw field name.
    pub field: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Which shown blocks survive the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Retention {
    /// Only the marked blocks stay.
    Marked(BTreeSet<RoomDay>),
    /// Every block stays except these.
    AllExcept(BTreeSet<RoomDay>),
}

/// Parsed calendar edits.
///
/// # Examples
///
/// ```
/// use innkeep::operations::CalendarForm;
/// use innkeep::RoomId;
/// use innkeep::stay::parse_date;
///
/// let form = CalendarForm::from_field_names([
///     "remove_block_1_2024-07-15",
///     "add_block_7_2024-7-22",
///     "csrf_token",
/// ]);
/// let room = RoomId::try_from(1).unwrap();
///
/// assert!(form.keeps(room, parse_date("2024-07-15").unwrap()));
/// assert!(!form.keeps(room, parse_date("2024-07-20").unwrap()));
/// assert_eq!(form.additions().len(), 1);
/// assert!(form.parse_failures().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarForm {
    retention: Retention,
    add: BTreeSet<RoomDay>,
    parse_failures: Vec<FieldParseFailure>,
}

impl CalendarForm {
    /// Creates an empty checkbox form: no block is marked kept, so every
    /// shown block would be removed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            retention: Retention::Marked(BTreeSet::new()),
            add: BTreeSet::new(),
            parse_failures: Vec::new(),
        }
    }

    /// Creates an edit set that keeps every shown block unless it is
    /// listed with [`CalendarForm::remove`].
    #[must_use]
    pub fn edits() -> Self {
        Self {
            retention: Retention::AllExcept(BTreeSet::new()),
            ..Self::new()
        }
    }

    /// Parses posted field names. Unrelated fields are ignored.
    #[must_use]
    pub fn from_field_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = Self::new();
        for name in names {
            form.push_field(name.as_ref());
        }
        form
    }

    /// Parses one posted field name.
    pub fn push_field(&mut self, name: &str) {
        let (prefix, rest, is_keep) = if let Some(rest) = name.strip_prefix(KEEP_BLOCK_PREFIX) {
            (KEEP_BLOCK_PREFIX, rest, true)
        } else if let Some(rest) = name.strip_prefix(ADD_BLOCK_PREFIX) {
            (ADD_BLOCK_PREFIX, rest, false)
        } else {
            return;
        };

        match parse_room_day(rest) {
            Ok(entry) if is_keep => self.mark_kept(entry),
            Ok(entry) => {
                self.add.insert(entry);
            }
            Err(reason) => {
                log::warn!("ignoring calendar field {name}: {reason}");
                self.parse_failures.push(FieldParseFailure {
                    field: name.to_string(),
                    reason: format!("{reason} (expected {prefix}{{room}}_{{YYYY-MM-DD}})"),
                });
            }
        }
    }

    /// Marks a shown block as kept.
    #[must_use]
    pub fn keep(mut self, room_id: RoomId, day: NaiveDate) -> Self {
        self.mark_kept((room_id, day));
        self
    }

    /// Marks a shown block for removal.
    #[must_use]
    pub fn remove(mut self, room_id: RoomId, day: NaiveDate) -> Self {
        match &mut self.retention {
            Retention::Marked(kept) => {
                kept.remove(&(room_id, day));
            }
            Retention::AllExcept(removed) => {
                removed.insert((room_id, day));
            }
        }
        self
    }

    /// Requests a new block.
    #[must_use]
    pub fn add(mut self, room_id: RoomId, day: NaiveDate) -> Self {
        self.add.insert((room_id, day));
        self
    }

    /// Returns `true` if a block shown on `day` for the room should stay.
    #[must_use]
    pub fn keeps(&self, room_id: RoomId, day: NaiveDate) -> bool {
        match &self.retention {
            Retention::Marked(kept) => kept.contains(&(room_id, day)),
            Retention::AllExcept(removed) => !removed.contains(&(room_id, day)),
        }
    }

    /// Returns the requested new blocks in room, day order.
    #[must_use]
    pub fn additions(&self) -> &BTreeSet<RoomDay> {
        &self.add
    }

    /// Returns fields that named a block but could not be parsed.
    #[must_use]
    pub fn parse_failures(&self) -> &[FieldParseFailure] {
        &self.parse_failures
    }

    fn mark_kept(&mut self, entry: RoomDay) {
        match &mut self.retention {
            Retention::Marked(kept) => {
                kept.insert(entry);
            }
            Retention::AllExcept(removed) => {
                removed.remove(&entry);
            }
        }
    }
}

impl Default for CalendarForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the checkbox name that keeps a shown block.
#[must_use]
pub fn keep_field_name(room_id: RoomId, day: NaiveDate) -> String {
    format!("{KEEP_BLOCK_PREFIX}{room_id}_{day}")
}

/// Returns the checkbox name that adds a block.
#[must_use]
pub fn add_field_name(room_id: RoomId, day: NaiveDate) -> String {
    format!("{ADD_BLOCK_PREFIX}{room_id}_{day}")
}

fn parse_room_day(rest: &str) -> Result<RoomDay, String> {
    let (room, date) = rest
        .split_once('_')
        .ok_or_else(|| "missing room or date".to_string())?;
    let room_id = room
        .parse::<RoomId>()
        .map_err(|e| format!("bad room id {room:?}: {e}"))?;
    let day = parse_date(date).map_err(|e| format!("bad date {date:?}: {e}"))?;
    Ok((room_id, day))
}
