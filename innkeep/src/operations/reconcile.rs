//! Calendar reconciliation.
//!
//! Diffs an admin's submitted calendar edits against the block maps that
//! admin was shown, then deletes removed blocks and inserts added ones.
//! Each write is independent: failures are collected in the summary and
//! nothing already applied is rolled back.
//!
//! The "shown" maps normally come from a [`crate::SessionCache`]. A room
//! without one falls back to its live block map, so a concurrent edit by
//! another admin can be overwritten.

use std::collections::BTreeMap;

use crate::calendar::{materialize, DayMap, Month};
use crate::error::{ErrorCategory, Result};
use crate::repository::Repository;
use crate::restriction::RestrictionId;
use crate::session::SessionCache;
use crate::RoomId;

use super::calendar_form::{CalendarForm, FieldParseFailure};
use super::executor::{ActionFailure, PlanExecutor};
use super::plan::{OperationPlan, PlanAction};

/// Options for reconciling one month of calendar edits.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// The month the edits were made against.
    pub month: Month,

    /// The submitted edits.
    pub form: CalendarForm,

    /// Rooms to reconcile; all rooms when `None`.
    pub rooms: Option<Vec<RoomId>>,

    /// Block maps shown before the edit, per room.
    pub previous: BTreeMap<RoomId, DayMap>,

    /// Report the changes without writing them.
    pub dry_run: bool,
}

impl ReconcileOptions {
    /// Creates options for a month and its submitted form.
    #[must_use]
    pub fn new(month: Month, form: CalendarForm) -> Self {
        Self {
            month,
            form,
            rooms: None,
            previous: BTreeMap::new(),
            dry_run: false,
        }
    }

    /// Restricts reconciliation to the given rooms.
    #[must_use]
    pub fn with_rooms(mut self, rooms: Vec<RoomId>) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Supplies the block map a room was shown with.
    #[must_use]
    pub fn with_previous(mut self, room_id: RoomId, blocks: DayMap) -> Self {
        self.previous.insert(room_id, blocks);
        self
    }

    /// Loads the block maps `session` was shown for these rooms. Rooms
    /// without a stored map are left to the live fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read.
    pub fn with_session_snapshots<C: SessionCache + ?Sized>(
        mut self,
        cache: &C,
        session: &str,
        rooms: &[RoomId],
    ) -> Result<Self> {
        for &room_id in rooms {
            if let Some(blocks) = cache.load_blocks(session, room_id, self.month)? {
                self.previous.insert(room_id, blocks);
            }
        }
        Ok(self)
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Outcome of a reconciliation.
#[derive(Debug, Clone, Default)]
pub struct ReconcileSummary {
    /// Whether nothing was written.
    pub dry_run: bool,
    /// Descriptions of applied (or, in dry-run, planned) actions.
    pub actions: Vec<String>,
    /// Blocks deleted.
    pub removed: usize,
    /// Blocks inserted.
    pub added: usize,
    /// Actions that were already in effect.
    pub skipped: usize,
    /// Actions that failed.
    pub failures: Vec<ActionFailure>,
    /// Form fields that could not be applied.
    pub parse_failures: Vec<FieldParseFailure>,
    /// Non-fatal notes for the admin.
    pub warnings: Vec<String>,
}

impl ReconcileSummary {
    /// Returns `true` if every submitted edit was understood and applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.parse_failures.is_empty()
    }

    /// Returns a one-line message for the admin.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::ReconcileSummary;
    ///
    /// let summary = ReconcileSummary { removed: 1, added: 2, ..Default::default() };
    /// assert_eq!(summary.flash_message(), "Changes saved: 1 block(s) removed, 2 added");
    /// ```
    #[must_use]
    pub fn flash_message(&self) -> String {
        let counts = format!("{} block(s) removed, {} added", self.removed, self.added);
        if self.dry_run {
            format!("Dry run: {} change(s) planned", self.actions.len())
        } else if self.is_clean() {
            format!("Changes saved: {counts}")
        } else {
            format!(
                "Some changes could not be saved ({} failed): {counts}",
                self.failures.len() + self.parse_failures.len()
            )
        }
    }

    /// Returns the categories of failed actions, for callers choosing a
    /// message or exit status.
    pub fn failure_categories(&self) -> impl Iterator<Item = ErrorCategory> + '_ {
        self.failures.iter().map(|f| f.category)
    }
}

/// A reconcile operation planner.
pub struct ReconcilePlan<'o> {
    options: &'o ReconcileOptions,
}

impl<'o> ReconcilePlan<'o> {
    /// Creates a new reconcile plan.
    #[must_use]
    pub const fn new(options: &'o ReconcileOptions) -> Self {
        Self { options }
    }

    /// Builds the plan: block removals in room, day order followed by block
    /// additions. Additions for rooms that do not exist are returned as
    /// field failures instead of actions.
    ///
    /// # Errors
    ///
    /// Returns a storage error if rooms or live block maps cannot be read.
    pub fn build_plan<R: Repository + ?Sized>(
        &self,
        repo: &R,
    ) -> Result<(OperationPlan, Vec<FieldParseFailure>)> {
        let ReconcileOptions {
            month,
            ref form,
            ref rooms,
            ref previous,
            ..
        } = *self.options;

        let rooms = match rooms {
            Some(rooms) => rooms.clone(),
            None => repo.list_all_rooms()?.iter().map(crate::Room::id).collect(),
        };

        let mut plan = OperationPlan::new(format!("Edit calendar {month}"));
        for &room_id in &rooms {
            let live;
            let blocks = if let Some(blocks) = previous.get(&room_id) {
                blocks
            } else {
                live = materialize(repo, room_id, month.first_day(), month.last_day())?.blocks;
                plan = plan.add_warning(format!(
                    "no calendar snapshot for room {room_id} in {month}; using current blocks"
                ));
                &live
            };

            for (day, id) in blocks.occupied() {
                if !form.keeps(room_id, day) {
                    plan = plan.add_action(PlanAction::RemoveBlock {
                        room_id,
                        day,
                        restriction_id: RestrictionId::new(id),
                    });
                }
            }
        }

        let mut failures = Vec::new();
        for &(room_id, day) in form.additions() {
            if rooms.contains(&room_id) {
                plan = plan.add_action(PlanAction::AddBlock { room_id, day });
            } else {
                failures.push(FieldParseFailure {
                    field: super::calendar_form::add_field_name(room_id, day),
                    reason: format!("room {room_id} is not part of this calendar"),
                });
            }
        }

        Ok((plan, failures))
    }
}

/// Applies submitted calendar edits.
///
/// # Errors
///
/// Returns a storage error only if planning cannot read rooms or live block
/// maps. Write failures are reported in [`ReconcileSummary::failures`].
///
/// # Examples
///
/// ```no_run
/// use innkeep::operations::{reconcile, CalendarForm, ReconcileOptions};
/// use innkeep::{Database, DatabaseConfig, Month};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let month: Month = "2024-07".parse().unwrap();
/// let form = CalendarForm::from_field_names(["remove_block_1_2024-07-15", "add_block_7_2024-07-22"]);
///
/// let summary = reconcile(&mut db, &ReconcileOptions::new(month, form)).unwrap();
/// println!("{}", summary.flash_message());
/// ```
pub fn reconcile<R: Repository + ?Sized>(
    repo: &mut R,
    options: &ReconcileOptions,
) -> Result<ReconcileSummary> {
    let (plan, unknown_rooms) = ReconcilePlan::new(options).build_plan(repo)?;

    let mut executor = PlanExecutor::new(repo);
    if options.dry_run {
        executor = executor.dry_run();
    }
    let result = executor.execute(&plan)?;

    let mut parse_failures = options.form.parse_failures().to_vec();
    parse_failures.extend(unknown_rooms);

    let summary = ReconcileSummary {
        dry_run: result.dry_run,
        actions: result.actions_taken,
        removed: result.blocks_removed,
        added: result.blocks_added,
        skipped: result.blocks_skipped,
        failures: result.failures,
        parse_failures,
        warnings: result.warnings,
    };
    log::info!("calendar {}: {}", options.month, summary.flash_message());
    Ok(summary)
}
