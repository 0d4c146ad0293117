//! Reservations command implementation.
//!
//! This module implements the `reservations` command, which lists stored
//! reservations in table, JSON or CSV form, latest stay first.

use std::io::Write;

use clap::Args;
use innkeep::{Database, Reservation};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions, OutputFormat};

/// Column headers for CSV and table output.
const COLUMN_HEADERS: [&str; 9] = [
    "id",
    "room_id",
    "start_date",
    "end_date",
    "first_name",
    "last_name",
    "email",
    "phone",
    "processed",
];

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Only show reservations not yet processed
    #[arg(long)]
    pub new: bool,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations = if self.new {
            Database::list_new_reservations(db.connection())?
        } else {
            Database::list_reservations(db.connection())?
        };

        match OutputFormat::resolve(self.format, &config) {
            OutputFormat::Table => format_as_table(&reservations),
            OutputFormat::Json => format_as_json(&reservations),
            OutputFormat::Csv => format_as_csv(&reservations),
        }
    }
}

fn record(r: &Reservation) -> [String; 9] {
    [
        r.id().map(|id| id.to_string()).unwrap_or_default(),
        r.room_id().to_string(),
        r.stay().start().to_string(),
        r.stay().end().to_string(),
        r.guest().first_name().to_string(),
        r.guest().last_name().to_string(),
        r.guest().email().to_string(),
        r.guest().phone().to_string(),
        r.processed().to_string(),
    ]
}

fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for reservation in reservations {
        writeln!(handle, "{}", record(reservation).join("\t"))?;
    }

    Ok(())
}

fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations.iter().map(reservation_json).collect();
    serde_json::to_writer_pretty(&mut handle, &json_data)?;
    writeln!(handle)?;

    Ok(())
}

fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    writer.write_record(COLUMN_HEADERS)?;
    for reservation in reservations {
        writer.write_record(record(reservation))?;
    }
    writer.flush()?;

    Ok(())
}

/// JSON view of a reservation. Shared with `reservation show`.
pub fn reservation_json(r: &Reservation) -> serde_json::Value {
    serde_json::json!({
        "id": r.id().map(|id| id.value()),
        "room_id": r.room_id().value(),
        "start_date": r.stay().start().to_string(),
        "end_date": r.stay().end().to_string(),
        "first_name": r.guest().first_name(),
        "last_name": r.guest().last_name(),
        "email": r.guest().email(),
        "phone": r.guest().phone(),
        "processed": r.processed(),
        "created_at": r.created_at().to_rfc3339(),
        "updated_at": r.updated_at().to_rfc3339(),
    })
}
