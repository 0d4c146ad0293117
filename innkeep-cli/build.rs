//! Build script for innkeep-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! The command structure is rebuilt here by hand because build scripts
//! cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("innkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search availability, book rooms and edit occupancy calendars")
        .long_about(
            "Room availability and restriction engine for a small inn: searches free rooms, \
             books stays without double booking and maintains owner blocks",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("INNKEEP_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("INNKEEP_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database and optionally a configuration file and rooms"),
            Command::new("room")
                .about("Add and list rooms")
                .long_about("Manage the rooms that can be searched and booked"),
            Command::new("search")
                .about("Find rooms free for a stay")
                .long_about("List rooms with no reservation or block on any night of the stay"),
            Command::new("reserve")
                .about("Reserve a room for a stay")
                .long_about("Book a room, writing the reservation and its restriction atomically"),
            Command::new("reservations")
                .about("List reservations")
                .long_about("Display reservations, latest stay first, as a table, JSON or CSV"),
            Command::new("reservation")
                .about("Show, update, process or delete a reservation")
                .long_about("Administer a single reservation by id"),
            Command::new("calendar")
                .about("Show a month of occupancy or edit owner blocks")
                .long_about(
                    "Render reservations and blocks per room and day, and apply block edits \
                     against the calendar a session was shown",
                ),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the innkeep data directory"),
            Command::new("show-config")
                .about("Show the effective configuration")
                .long_about("Display the configuration after files, environment and flags merge"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check an innkeep configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("innkeep.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
