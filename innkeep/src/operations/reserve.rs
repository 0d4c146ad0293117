//! Reserve operation planning.
//!
//! Planning validates the request against current storage: the room must
//! exist and be free for the whole stay. Execution writes the reservation
//! and its restriction atomically and re-checks availability under the
//! write lock, so a stay taken between planning and execution surfaces as
//! a conflict rather than a double booking.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::reservation::BookingConfirmation;
use crate::{GuestContact, Reservation, RoomId, Stay};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The room to reserve.
    pub room_id: RoomId,

    /// The nights to reserve.
    pub stay: Stay,

    /// The guest's validated contact details.
    pub guest: GuestContact,
}

impl ReserveOptions {
    /// Creates reserve options.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::ReserveOptions;
    /// use innkeep::{GuestContact, RoomId, Stay};
    ///
    /// let options = ReserveOptions::new(
    ///     RoomId::try_from(1).unwrap(),
    ///     Stay::parse("2024-07-01", "2024-07-05").unwrap(),
    ///     GuestContact::new("Grace", "Hopper", "grace@example.com", "555-0101").unwrap(),
    /// );
    /// assert_eq!(options.stay.nights(), 4);
    /// ```
    #[must_use]
    pub const fn new(room_id: RoomId, stay: Stay, guest: GuestContact) -> Self {
        Self {
            room_id,
            stay,
            guest,
        }
    }
}

/// A reserve operation planner.
pub struct ReservePlan {
    options: ReserveOptions,
}

impl ReservePlan {
    /// Creates a new reserve plan.
    #[must_use]
    pub const fn new(options: ReserveOptions) -> Self {
        Self { options }
    }

    /// Builds a plan for this reserve operation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room does not exist,
    /// [`Error::Conflict`] if it is not free for the stay, or a storage
    /// error.
    pub fn build_plan<R: Repository + ?Sized>(&self, repo: &R) -> Result<OperationPlan> {
        let ReserveOptions {
            room_id,
            stay,
            ref guest,
        } = self.options;

        let room = repo.get_room(room_id)?.ok_or_else(|| Error::Validation {
            field: "room_id".into(),
            message: format!("room {room_id} does not exist"),
        })?;

        if !repo.is_room_free_in_range(room_id, &stay)? {
            return Err(Error::Conflict {
                details: format!("{room} is no longer available for {stay}"),
            });
        }

        let reservation = Reservation::builder(room_id, stay).guest(guest).build()?;

        let mut plan = OperationPlan::new(format!("Reserve {room} for {stay}"))
            .add_action(PlanAction::CreateReservation(reservation));
        if stay.start() < Utc::now().date_naive() {
            plan = plan.add_warning(format!("stay {stay} starts in the past"));
        }
        Ok(plan)
    }
}

/// Plans and executes a reservation in one step.
///
/// # Errors
///
/// Returns the planning or execution error; nothing is written on error.
pub fn reserve<R: Repository + ?Sized>(
    repo: &mut R,
    options: ReserveOptions,
) -> Result<BookingConfirmation> {
    let plan = ReservePlan::new(options).build_plan(repo)?;
    let result = PlanExecutor::new(repo).execute(&plan)?;
    result.confirmation.ok_or_else(|| Error::Integrity {
        details: "reservation plan produced no confirmation".into(),
    })
}
