//! Booking and calendar operations using the plan-execute pattern.
//!
//! Operations that write are split into two phases so they can be
//! inspected, dry-run and tested without storage:
//! 1. **Planning**: validates the request against current state and builds
//!    an [`OperationPlan`]
//! 2. **Execution**: [`PlanExecutor`] applies the plan through a
//!    [`crate::Repository`]
//!
//! Reservations are all-or-nothing. Calendar edits are best-effort: each
//! block write stands alone and failures are reported, not rolled back.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::operations::{reconcile, CalendarForm, ReconcileOptions, ReserveOptions, ReservePlan, PlanExecutor};
//! use innkeep::{Database, DatabaseConfig, GuestContact, Month, RoomId, Stay};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//!
//! let guest = GuestContact::new("Grace", "Hopper", "grace@example.com", "555-0101").unwrap();
//! let options = ReserveOptions::new(
//!     RoomId::try_from(1).unwrap(),
//!     Stay::parse("2024-07-01", "2024-07-05").unwrap(),
//!     guest,
//! );
//! let plan = ReservePlan::new(options).build_plan(&db).unwrap();
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! println!("{:?}", result.confirmation);
//!
//! let month: Month = "2024-07".parse().unwrap();
//! let form = CalendarForm::edits().add(RoomId::try_from(1).unwrap(), month.last_day());
//! let summary = reconcile(&mut db, &ReconcileOptions::new(month, form)).unwrap();
//! println!("{}", summary.flash_message());
//! ```

pub mod admin;
pub mod calendar_form;
pub mod executor;
pub mod init;
pub mod plan;
pub mod reconcile;
pub mod reserve;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use admin::{delete_reservation, get_reservation, set_processed, update_guest};
pub use calendar_form::{
    add_field_name, keep_field_name, CalendarForm, FieldParseFailure, RoomDay, ADD_BLOCK_PREFIX,
    KEEP_BLOCK_PREFIX,
};
pub use executor::{ActionFailure, ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use reconcile::{reconcile, ReconcileOptions, ReconcilePlan, ReconcileSummary};
pub use reserve::{reserve, ReserveOptions, ReservePlan};
