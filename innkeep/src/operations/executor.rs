//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and
//! applies them through a [`Repository`].
//!
//! Reservation creation is all-or-nothing: a failure aborts execution with
//! the error. Block actions are best-effort: each is applied independently,
//! failures are collected in the result and nothing already applied is
//! rolled back.

use crate::error::{ErrorCategory, Result};
use crate::repository::Repository;
use crate::reservation::BookingConfirmation;
use crate::restriction::NewRestriction;

use super::plan::{OperationPlan, PlanAction};

/// A block action that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    /// Description of the failed action.
    pub action: String,
    /// Why it failed.
    pub error: String,
    /// The failure's category.
    pub category: ErrorCategory,
}

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether every action succeeded.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan and from execution.
    pub warnings: Vec<String>,

    /// Ids assigned to a created reservation.
    pub confirmation: Option<BookingConfirmation>,

    /// Number of blocks deleted.
    pub blocks_removed: usize,

    /// Number of blocks inserted.
    pub blocks_added: usize,

    /// Number of block actions that were already in effect.
    pub blocks_skipped: usize,

    /// Block actions that failed.
    pub failures: Vec<ActionFailure>,
}

impl ExecutionResult {
    fn empty(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: Vec::new(),
            warnings: plan.warnings.clone(),
            confirmation: None,
            blocks_removed: 0,
            blocks_added: 0,
            blocks_skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Creates a dry-run execution result.
    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            ..Self::empty(plan, true)
        }
    }

    fn fail(&mut self, action: &PlanAction, error: &crate::Error) {
        log::warn!("{} failed: {error}", action.description());
        self.failures.push(ActionFailure {
            action: action.description(),
            error: error.to_string(),
            category: error.category(),
        });
    }
}

/// Executes operation plans against a repository.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting without changes).
///
/// # Examples
///
/// ```no_run
/// use innkeep::operations::{PlanExecutor, ReserveOptions, ReservePlan};
/// use innkeep::{Database, DatabaseConfig, GuestContact, RoomId, Stay};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let guest = GuestContact::new("Grace", "Hopper", "grace@example.com", "555-0101").unwrap();
/// let options = ReserveOptions::new(
///     RoomId::try_from(1).unwrap(),
///     Stay::parse("2024-07-01", "2024-07-05").unwrap(),
///     guest,
/// );
/// let plan = ReservePlan::new(options).build_plan(&db).unwrap();
///
/// let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
/// println!("{:?}", result.confirmation);
/// ```
pub struct PlanExecutor<'a, R: Repository + ?Sized> {
    repo: &'a mut R,
    dry_run: bool,
}

impl<'a, R: Repository + ?Sized> PlanExecutor<'a, R> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(repo: &'a mut R) -> Self {
        Self {
            repo,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan's actions but does
    /// not write anything.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if creating a reservation fails. Block action
    /// failures are reported in [`ExecutionResult::failures`] instead.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(ExecutionResult::dry_run(plan));
        }

        let mut result = ExecutionResult::empty(plan, false);
        for action in &plan.actions {
            self.execute_action(action, &mut result)?;
        }
        result.success = result.failures.is_empty();

        log::debug!(
            "{}: {} removed, {} added, {} skipped, {} failed",
            plan.description,
            result.blocks_removed,
            result.blocks_added,
            result.blocks_skipped,
            result.failures.len()
        );
        Ok(result)
    }

    /// Executes a single action.
    fn execute_action(&mut self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::CreateReservation(reservation) => {
                let confirmation = self.repo.insert_reservation_with_restriction(reservation)?;
                result.confirmation = Some(confirmation);
                result.actions_taken.push(action.description());
            }
            PlanAction::RemoveBlock {
                room_id,
                day,
                restriction_id,
            } => match self.repo.delete_restriction(*restriction_id) {
                Ok(true) => {
                    log::info!("removed block {restriction_id} on room {room_id} for {day}");
                    result.blocks_removed += 1;
                    result.actions_taken.push(action.description());
                }
                Ok(false) => {
                    result.blocks_skipped += 1;
                    result
                        .warnings
                        .push(format!("block on room {room_id} for {day} was already removed"));
                }
                Err(e) => result.fail(action, &e),
            },
            PlanAction::AddBlock { room_id, day } => {
                let inserted = NewRestriction::block(*room_id, *day)
                    .map_err(crate::Error::from)
                    .and_then(|block| self.repo.insert_restriction(&block));
                match inserted {
                    Ok(id) => {
                        log::info!("blocked room {room_id} on {day} (restriction {id})");
                        result.blocks_added += 1;
                        result.actions_taken.push(action.description());
                    }
                    Err(e) if e.is_conflict() => {
                        log::warn!("room {room_id} already blocked on {day}; skipping");
                        result.blocks_skipped += 1;
                        result
                            .warnings
                            .push(format!("room {room_id} is already blocked on {day}"));
                    }
                    Err(e) => result.fail(action, &e),
                }
            }
        }
        Ok(())
    }
}
