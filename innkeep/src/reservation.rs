//! Reservation types for tracking guest bookings.
//!
//! This module provides the guest reservation record, its validated contact
//! details, and a builder for construction.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::restriction::RestrictionId;
use crate::{RoomId, Stay};

/// Minimum length of a guest's first name.
pub const FIRST_NAME_MIN_LENGTH: usize = 3;

/// A reservation identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a storage-assigned id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details of the guest holding a reservation.
///
/// All fields are trimmed and must be non-empty; the first name must be at
/// least [`FIRST_NAME_MIN_LENGTH`] characters and the email must look like
/// an address.
///
/// # Examples
///
/// ```
/// use innkeep::GuestContact;
///
/// let guest = GuestContact::new("Ada", "Lovelace", "ada@example.com", "555-0100").unwrap();
/// assert_eq!(guest.full_name(), "Ada Lovelace");
///
/// assert!(GuestContact::new("Al", "Smith", "al@example.com", "555").is_err());
/// assert!(GuestContact::new("Alice", "Smith", "not-an-email", "555").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestContact {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl GuestContact {
    /// Creates validated contact details.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = required("first_name", first_name.into())?;
        let last_name = required("last_name", last_name.into())?;
        let email = required("email", email.into())?;
        let phone = required("phone", phone.into())?;

        if first_name.chars().count() < FIRST_NAME_MIN_LENGTH {
            return Err(ValidationError {
                field: "first_name".into(),
                message: format!("must be at least {FIRST_NAME_MIN_LENGTH} characters long"),
            });
        }

        if !is_valid_email(&email) {
            return Err(ValidationError {
                field: "email".into(),
                message: "invalid email address".into(),
            });
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
        })
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: "this field cannot be blank".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain without empty labels or whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

/// A guest reservation for one room over one stay.
///
/// The id is `None` until the reservation has been written by the
/// reservation writer.
///
/// # Examples
///
/// ```
/// use innkeep::{Reservation, RoomId, Stay};
///
/// let reservation = Reservation::builder(RoomId::try_from(1).unwrap(), Stay::parse("2024-07-01", "2024-07-05").unwrap())
///     .first_name("Grace")
///     .last_name("Hopper")
///     .email("grace@example.com")
///     .phone("555-0101")
///     .build()
///     .unwrap();
///
/// assert!(reservation.id().is_none());
/// assert!(!reservation.processed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    room_id: RoomId,
    stay: Stay,
    guest: GuestContact,
    processed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(room_id: RoomId, stay: Stay) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            room_id,
            stay,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            processed: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the storage id, if the reservation has been written.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the reserved room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the reserved stay.
    #[must_use]
    pub const fn stay(&self) -> Stay {
        self.stay
    }

    /// Returns the guest contact details.
    #[must_use]
    pub const fn guest(&self) -> &GuestContact {
        &self.guest
    }

    /// Returns whether an administrator has processed the reservation.
    #[must_use]
    pub const fn processed(&self) -> bool {
        self.processed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy carrying the storage-assigned id.
    #[must_use]
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with new guest details and a fresh `updated_at`.
    #[must_use]
    pub fn with_guest(mut self, guest: GuestContact) -> Self {
        self.guest = guest;
        self.updated_at = Utc::now();
        self
    }

    /// Returns a copy with the processed flag set and a fresh `updated_at`.
    #[must_use]
    pub fn with_processed(mut self, processed: bool) -> Self {
        self.processed = processed;
        self.updated_at = Utc::now();
        self
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    room_id: RoomId,
    stay: Stay,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    processed: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the storage id (used when loading from the database).
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the guest's first name.
    #[must_use]
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    /// Sets the guest's last name.
    #[must_use]
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    /// Sets the guest's email address.
    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = value.into();
        self
    }

    /// Sets the guest's phone number.
    #[must_use]
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = value.into();
        self
    }

    /// Copies all contact fields from validated details.
    #[must_use]
    pub fn guest(self, guest: &GuestContact) -> Self {
        self.first_name(guest.first_name())
            .last_name(guest.last_name())
            .email(guest.email())
            .phone(guest.phone())
    }

    /// Sets the processed flag.
    #[must_use]
    pub const fn processed(mut self, processed: bool) -> Self {
        self.processed = processed;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the last modification timestamp.
    #[must_use]
    pub const fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest contact fields fail validation.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let guest = GuestContact::new(self.first_name, self.last_name, self.email, self.phone)?;
        let now = Utc::now();
        let created_at = self.created_at.unwrap_or(now);
        Ok(Reservation {
            id: self.id,
            room_id: self.room_id,
            stay: self.stay,
            guest,
            processed: self.processed,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        })
    }
}

/// Ids assigned when a reservation and its restriction are written together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// The new reservation's id.
    pub reservation_id: ReservationId,
    /// The id of the restriction occupying the room for the stay.
    pub restriction_id: RestrictionId,
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
