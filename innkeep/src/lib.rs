#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! An availability and restriction engine for room reservations.
//!
//! This library decides whether rooms are free over a stay, records
//! reservations together with the date ranges they hold, materializes
//! per-room monthly occupancy calendars, and reconciles an administrator's
//! calendar edits (owner blocks) against stored state.
//!
//! ## Core Types
//!
//! - [`Stay`]: a validated half-open range of nights
//! - [`Room`], [`Reservation`] and [`RoomRestriction`]: the stored entities
//! - [`Repository`]: the storage interface, implemented by [`Database`]
//! - [`Month`] and [`DayMap`]: calendar materialization
//! - [`SessionCache`]: previously shown calendars, per admin session
//! - [`Error`] and [`Result`]: Error handling types
//!
//! ## Examples
//!
//! ```
//! use innkeep::Stay;
//!
//! let booked = Stay::parse("2024-07-01", "2024-07-05").unwrap();
//! assert_eq!(booked.nights(), 4);
//!
//! // Checkout day is free for the next guest
//! let next = Stay::parse("2024-07-05", "2024-07-06").unwrap();
//! assert!(!booked.overlaps(&next));
//! ```

pub mod availability;
pub mod calendar;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod repository;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod session;
pub mod stay;

// Re-export key types at crate root for convenience
pub use calendar::{DayMap, Month, MonthMaps, RoomCalendar};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, SnapshotStore};
pub use error::{Error, ErrorCategory, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    CalendarForm, ExecutionResult, OperationPlan, PlanAction, PlanExecutor, ReconcileOptions,
    ReconcileSummary, ReserveOptions, ReservePlan,
};
pub use repository::Repository;
pub use reservation::{BookingConfirmation, GuestContact, Reservation, ReservationId};
pub use restriction::{NewRestriction, RestrictionId, RestrictionKind, RoomRestriction};
pub use room::{Room, RoomId};
pub use session::{store_calendar, MemorySessionCache, SessionCache};
pub use stay::Stay;
