//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a room for a
//! stay. On success the new reservation id is the only thing on stdout.

use chrono::NaiveDate;
use clap::Args;
use innkeep::{GuestContact, PlanExecutor, ReserveOptions, ReservePlan, RoomId};

use crate::error::CliError;
use crate::utils::{
    build_stay, load_configuration, open_database, parse_day, parse_room_id, GlobalOptions,
};

/// Reserve a room for a stay.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room to book
    #[arg(long, value_name = "ID", value_parser = parse_room_id)]
    pub room: RoomId,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_day)]
    pub checkin: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_day)]
    pub checkout: NaiveDate,

    /// Guest first name
    #[arg(long, value_name = "NAME")]
    pub first_name: String,

    /// Guest last name
    #[arg(long, value_name = "NAME")]
    pub last_name: String,

    /// Guest email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Guest phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate input before touching storage
        let stay = build_stay(self.checkin, self.checkout)?;
        let guest = GuestContact::new(self.first_name, self.last_name, self.email, self.phone)
            .map_err(|e| CliError::from(innkeep::Error::from(e)))?;

        // 2. Open database
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        // 3. Build plan
        let plan = ReservePlan::new(ReserveOptions::new(self.room, stay, guest)).build_plan(&db)?;

        // 4. Execute or dry-run
        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
                for warning in &plan.warnings {
                    eprintln!("Warning: {warning}");
                }
            }
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        if let Some(confirmation) = result.confirmation {
            println!("{}", confirmation.reservation_id);
            if global.verbose {
                eprintln!(
                    "Booked room {} for {stay} (restriction {})",
                    self.room, confirmation.restriction_id
                );
            }
        }

        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }

        Ok(())
    }
}
