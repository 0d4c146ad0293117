//! Room commands: `room add` and `room list`.

use std::io::Write;

use clap::{Args, Subcommand};
use innkeep::{Database, Room, RoomId};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_room_id, GlobalOptions, OutputFormat};

/// Manage rooms.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub action: RoomAction,
}

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomAction {
    /// Add a room
    Add {
        /// Room id
        #[arg(value_parser = parse_room_id)]
        id: RoomId,

        /// Display name
        name: String,
    },

    /// List rooms in id order
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self.action {
            RoomAction::Add { id, name } => {
                let name = name.trim();
                db.insert_room(&Room::new(id, name))?;
                if !global.quiet {
                    eprintln!("Added room {id}: {name}");
                }
                Ok(())
            }
            RoomAction::List { format } => {
                let rooms = Database::list_rooms(db.connection())?;
                print_rooms(&rooms, OutputFormat::resolve(format, &config))
            }
        }
    }
}

/// Print rooms to stdout. Shared with `search`.
pub fn print_rooms(rooms: &[Room], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "ID\tNAME")?;
            for room in rooms {
                writeln!(handle, "{}\t{}", room.id(), room.name())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, rooms)?;
            writeln!(handle)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(handle);
            writer.write_record(["id", "name"])?;
            for room in rooms {
                writer.write_record([room.id().to_string(), room.name().to_string()])?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
