//! CLI command implementations.
//!
//! - `init`: create the data directory and database, optionally with rooms
//! - `room`: add and list rooms
//! - `search`: find rooms free for a stay
//! - `reserve`: book a room
//! - `reservations`: list reservations
//! - `reservation`: show, update, process or delete one reservation
//! - `calendar`: show a month and edit owner blocks
//! - `show_data_dir`: show the data directory and effective configuration
//! - `validate`: check a configuration file
//! - `completions`: generate shell completions

pub mod calendar;
pub mod completions;
pub mod init;
pub mod reservation;
pub mod reservations;
pub mod reserve;
pub mod room;
pub mod search;
pub mod show_data_dir;
pub mod validate;

pub use calendar::CalendarCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use reservation::ReservationCommand;
pub use reservations::ReservationsCommand;
pub use reserve::ReserveCommand;
pub use room::RoomCommand;
pub use search::SearchCommand;
pub use show_data_dir::{ShowConfigCommand, ShowDataDirCommand};
pub use validate::ValidateCommand;
