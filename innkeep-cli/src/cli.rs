//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CalendarCommand, CompletionsCommand, InitCommand, ReservationCommand, ReservationsCommand,
    ReserveCommand, RoomCommand, SearchCommand, ShowConfigCommand, ShowDataDirCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Room availability, booking and occupancy calendars for a small inn.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Search availability, book rooms and edit occupancy calendars", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "INNKEEP_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Add and list rooms
    Room(RoomCommand),

    /// Find rooms free for a stay
    Search(SearchCommand),

    /// Reserve a room for a stay
    Reserve(ReserveCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// Show, update, process or delete a reservation
    Reservation(ReservationCommand),

    /// Show a month of occupancy or edit owner blocks
    Calendar(CalendarCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Show the effective configuration
    ShowConfig(ShowConfigCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
