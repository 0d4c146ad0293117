//! Data directory initialization.
//!
//! Creates the data directory and database explicitly, optionally writing a
//! commented configuration file and seeding rooms. Used when automatic
//! initialization is disabled.

use std::fs;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::database::DATABASE_FILE_NAME;
use crate::error::{Error, Result};
use crate::{Database, DatabaseConfig, Room};

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a commented configuration file.
    pub create_config: bool,
    /// Rooms to insert into the new database.
    pub rooms: Vec<Room>,
}

impl InitOptions {
    /// Creates initialization options for a data directory.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            rooms: Vec::new(),
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets the rooms to seed.
    #[must_use]
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }
}

/// Result of initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Number of rooms seeded.
    pub rooms_seeded: usize,
    /// The initialized data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# innkeep configuration

# Seconds to wait for the database write lock (default: 5)
# maximum_lock_wait_seconds: 5

# Seconds a stored calendar snapshot stays valid (default: 3600)
# session_ttl_seconds: 3600

# Refuse to create the database implicitly (default: false)
# disable_autoinit: false

# Default output format: table or json (default: table)
# output_format: table
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns a validation error if the database exists and `overwrite` is
/// not set, or an I/O or storage error if anything cannot be created.
///
/// # Examples
///
/// ```no_run
/// use innkeep::operations::init::{init_database, InitOptions};
/// use innkeep::{Room, RoomId};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/innkeep-test"))
///     .with_create_config(true)
///     .with_rooms(vec![Room::new(RoomId::try_from(1).unwrap(), "General's Quarters")]);
///
/// let result = init_database(&options).unwrap();
/// println!("seeded {} room(s)", result.rooms_seeded);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        rooms_seeded: 0,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    let db_exists = db_path.exists();
    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "database already exists at {}; use --overwrite to replace it",
                db_path.display()
            ),
        });
    }
    if db_exists {
        fs::remove_file(&db_path)?;
        // Stale WAL sidecars would be replayed into the new file
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
    }

    let mut db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if !options.rooms.is_empty() {
        db.batch_insert_rooms(&options.rooms)?;
        result.rooms_seeded = options.rooms.len();
    }

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!("initialized {}", options.data_dir.display());
    Ok(result)
}
