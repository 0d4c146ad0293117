//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the innkeep data directory and database, optionally seeding rooms.

use clap::Args;
use innkeep::config::CONFIG_FILE_NAME;
use innkeep::database::DATABASE_FILE_NAME;
use innkeep::operations::{init_database, InitOptions};
use innkeep::{Room, RoomId};

use crate::error::CliError;
use crate::utils::{parse_room_definition, resolve_data_dir, GlobalOptions};

/// Initialize the innkeep data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    pub overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    pub with_config: bool,

    /// Room to create, as ID:NAME (repeatable)
    #[arg(long = "room", value_name = "ID:NAME", value_parser = parse_room_definition)]
    pub rooms: Vec<(RoomId, String)>,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; this command is the explicit
    /// way to initialize.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize innkeep in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if !db_path.exists() {
                println!("  - Create database: {}", db_path.display());
            } else if self.overwrite {
                println!("  - Recreate database: {}", db_path.display());
            } else {
                println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                );
            }

            if self.with_config {
                let config_path = data_dir.join(CONFIG_FILE_NAME);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            for (id, name) in &self.rooms {
                println!("  - Add room {id}: {name}");
            }

            return Ok(());
        }

        let rooms = self
            .rooms
            .into_iter()
            .map(|(id, name)| Room::new(id, name))
            .collect();
        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_rooms(rooms);

        let result = init_database(&options)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized innkeep in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }
        if result.rooms_seeded > 0 {
            println!("  - Added {} room(s)", result.rooms_seeded);
        }

        Ok(())
    }
}
