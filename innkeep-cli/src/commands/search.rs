//! Search command implementation.
//!
//! Lists the rooms free for a stay, or checks a single room. A single-room
//! check exits with status 1 when the room is taken, like a conflict.

use chrono::NaiveDate;
use clap::Args;
use innkeep::availability::{is_room_available, search_availability};
use innkeep::RoomId;

use super::room::print_rooms;
use crate::error::CliError;
use crate::utils::{
    build_stay, load_configuration, open_database, parse_day, parse_room_id, GlobalOptions,
    OutputFormat,
};

/// Search for free rooms.
#[derive(Args)]
pub struct SearchCommand {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_day)]
    pub checkin: NaiveDate,

    /// Check-out date (YYYY-MM-DD); that night is not included
    #[arg(long, value_name = "DATE", value_parser = parse_day)]
    pub checkout: NaiveDate,

    /// Check only this room
    #[arg(long, value_name = "ID", value_parser = parse_room_id)]
    pub room: Option<RoomId>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = build_stay(self.checkin, self.checkout)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if let Some(room_id) = self.room {
            if is_room_available(&db, room_id, &stay)? {
                println!("Room {room_id} is available for {stay}");
                return Ok(());
            }
            return Err(CliError::from(innkeep::Error::Conflict {
                details: format!("room {room_id} is not available for {stay}"),
            }));
        }

        let rooms = search_availability(&db, &stay)?;
        if rooms.is_empty() && !global.quiet {
            eprintln!("No rooms available for {stay}");
        }
        print_rooms(&rooms, OutputFormat::resolve(self.format, &config))
    }
}
