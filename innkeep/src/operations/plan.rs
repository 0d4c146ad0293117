//! Plan types for booking and calendar operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use chrono::NaiveDate;

use crate::restriction::RestrictionId;
use crate::{Reservation, RoomId};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a specific repository write that will be
/// performed when the plan is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Write a reservation together with its restriction.
    CreateReservation(Reservation),

    /// Delete an owner block.
    RemoveBlock {
        /// The blocked room.
        room_id: RoomId,
        /// The blocked day.
        day: NaiveDate,
        /// The block to delete.
        restriction_id: RestrictionId,
    },

    /// Block a room for one day.
    AddBlock {
        /// The room to block.
        room_id: RoomId,
        /// The day to block.
        day: NaiveDate,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => format!(
                "Reserve room {} for {} ({})",
                r.room_id(),
                r.stay(),
                r.guest().full_name()
            ),
            Self::RemoveBlock {
                room_id,
                day,
                restriction_id,
            } => format!("Remove block {restriction_id} on room {room_id} for {day}"),
            Self::AddBlock { room_id, day } => format!("Block room {room_id} on {day}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Edit calendar 2024-07");
    /// assert_eq!(plan.description, "Edit calendar 2024-07");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::{OperationPlan, PlanAction};
    /// use innkeep::RoomId;
    /// use innkeep::stay::parse_date;
    ///
    /// let plan = OperationPlan::new("Test").add_action(PlanAction::AddBlock {
    ///     room_id: RoomId::try_from(7).unwrap(),
    ///     day: parse_date("2024-07-22").unwrap(),
    /// });
    ///
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
