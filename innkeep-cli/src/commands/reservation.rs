//! Reservation administration: show, update, process and delete.

use std::io::Write;

use clap::{Args, Subcommand};
use innkeep::operations::{delete_reservation, get_reservation, set_processed, update_guest};
use innkeep::{GuestContact, Reservation, ReservationId};

use super::reservations::reservation_json;
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions, OutputFormat};

fn parse_reservation_id(value: &str) -> Result<ReservationId, String> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(ReservationId::new(id)),
        _ => Err(format!("'{value}' is not a reservation id")),
    }
}

/// Administer one reservation.
#[derive(Args)]
pub struct ReservationCommand {
    #[command(subcommand)]
    pub action: ReservationAction,
}

/// Reservation subcommands.
#[derive(Subcommand)]
pub enum ReservationAction {
    /// Show a reservation
    Show {
        /// Reservation id
        #[arg(value_parser = parse_reservation_id)]
        id: ReservationId,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// Replace the guest contact details
    Update {
        /// Reservation id
        #[arg(value_parser = parse_reservation_id)]
        id: ReservationId,

        /// Guest first name
        #[arg(long, value_name = "NAME")]
        first_name: String,

        /// Guest last name
        #[arg(long, value_name = "NAME")]
        last_name: String,

        /// Guest email address
        #[arg(long, value_name = "EMAIL")]
        email: String,

        /// Guest phone number
        #[arg(long, value_name = "PHONE")]
        phone: String,
    },

    /// Mark a reservation processed
    Process {
        /// Reservation id
        #[arg(value_parser = parse_reservation_id)]
        id: ReservationId,

        /// Mark it unprocessed instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a reservation and free its nights
    Delete {
        /// Reservation id
        #[arg(value_parser = parse_reservation_id)]
        id: ReservationId,
    },
}

impl ReservationCommand {
    /// Execute the reservation command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self.action {
            ReservationAction::Show { id, format } => {
                let reservation = get_reservation(&db, id)?;
                print_reservation(&reservation, OutputFormat::resolve(format, &config))
            }
            ReservationAction::Update {
                id,
                first_name,
                last_name,
                email,
                phone,
            } => {
                let guest = GuestContact::new(first_name, last_name, email, phone)
                    .map_err(|e| CliError::from(innkeep::Error::from(e)))?;
                let updated = update_guest(&mut db, id, guest)?;
                if !global.quiet {
                    eprintln!("Updated reservation {id} ({})", updated.guest().full_name());
                }
                Ok(())
            }
            ReservationAction::Process { id, undo } => {
                set_processed(&mut db, id, !undo)?;
                if !global.quiet {
                    let state = if undo { "unprocessed" } else { "processed" };
                    eprintln!("Marked reservation {id} {state}");
                }
                Ok(())
            }
            ReservationAction::Delete { id } => {
                delete_reservation(&mut db, id)?;
                if !global.quiet {
                    eprintln!("Deleted reservation {id}");
                }
                Ok(())
            }
        }
    }
}

fn print_reservation(r: &Reservation, format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut handle, &reservation_json(r))?;
        writeln!(handle)?;
        return Ok(());
    }

    let id = r.id().map(|id| id.to_string()).unwrap_or_default();
    writeln!(handle, "Reservation: {id}")?;
    writeln!(handle, "Room:        {}", r.room_id())?;
    writeln!(handle, "Stay:        {} ({} night(s))", r.stay(), r.stay().nights())?;
    writeln!(handle, "Guest:       {}", r.guest().full_name())?;
    writeln!(handle, "Email:       {}", r.guest().email())?;
    writeln!(handle, "Phone:       {}", r.guest().phone())?;
    writeln!(handle, "Processed:   {}", if r.processed() { "yes" } else { "no" })?;
    writeln!(handle, "Created:     {}", r.created_at().format("%Y-%m-%d %H:%M:%S"))?;

    Ok(())
}
