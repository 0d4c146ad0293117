//! Date range types for room occupancy.
//!
//! A [`Stay`] is a half-open interval of calendar days `[start, end)`:
//! a guest arriving on `start` and leaving on `end` occupies the nights of
//! `start` through the day before `end`. All availability arithmetic in the
//! crate goes through [`Stay::overlaps`].

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar date format used at every boundary of the crate.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// Single-digit months and days (`2024-7-2`) are accepted as well.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
///
/// # Examples
///
/// ```
/// use innkeep::stay::parse_date;
///
/// let day = parse_date("2024-07-02").unwrap();
/// assert_eq!(day, parse_date("2024-7-2").unwrap());
/// assert!(parse_date("2024-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// A half-open range of calendar days `[start, end)`.
///
/// # Examples
///
/// ```
/// use innkeep::Stay;
///
/// let stay = Stay::parse("2024-07-01", "2024-07-05").unwrap();
/// assert_eq!(stay.nights(), 4);
///
/// // Checkout day is free for the next guest
/// let next = Stay::parse("2024-07-05", "2024-07-06").unwrap();
/// assert!(!stay.overlaps(&next));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay", into = "RawStay")]
pub struct Stay {
    start: NaiveDate,
    end: NaiveDate,
}

impl Stay {
    /// Creates a new stay.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not strictly after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidStayError> {
        if end <= start {
            return Err(InvalidStayError {
                start: start.to_string(),
                end: end.to_string(),
                reason: "end date must be after start date".into(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates the one-night stay `[day, day + 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `day` is the last representable date.
    pub fn single_day(day: NaiveDate) -> Result<Self, InvalidStayError> {
        let end = day.checked_add_days(Days::new(1)).ok_or_else(|| InvalidStayError {
            start: day.to_string(),
            end: String::new(),
            reason: "day is out of range".into(),
        })?;
        Self::new(day, end)
    }

    /// Parses a stay from two ISO dates.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, InvalidStayError> {
        let invalid = |reason: String| InvalidStayError {
            start: start.to_string(),
            end: end.to_string(),
            reason,
        };
        let start_date = parse_date(start).map_err(|e| invalid(format!("bad start date: {e}")))?;
        let end_date = parse_date(end).map_err(|e| invalid(format!("bad end date: {e}")))?;
        Self::new(start_date, end_date)
    }

    /// Returns the first day of the stay.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end of the stay (the checkout day).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of nights in the stay.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns `true` if the two stays share at least one night.
    ///
    /// This is the standard half-open test `a.start < b.end && a.end > b.start`,
    /// which catches partial, nested and enclosing collisions alike.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns `true` if the night of `day` falls inside the stay.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Iterates the nights of the stay, `start` first.
    pub fn nights_iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

impl fmt::Display for Stay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Serialize, Deserialize)]
struct RawStay {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawStay> for Stay {
    type Error = InvalidStayError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<Stay> for RawStay {
    fn from(stay: Stay) -> Self {
        Self {
            start: stay.start,
            end: stay.end,
        }
    }
}

/// Error type for malformed or inverted stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStayError {
    /// The start date as supplied.
    pub start: String,
    /// The end date as supplied.
    pub end: String,
    /// The reason the stay is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidStayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid stay {}..{}: {}", self.start, self.end, self.reason)
    }
}

impl std::error::Error for InvalidStayError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
