//! Utility functions for CLI operations.
//!
//! Configuration loading, database opening and the small parsers shared by
//! several commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use innkeep::config::OutputFormat as ConfigFormat;
use innkeep::database::{default_data_dir, DATABASE_FILE_NAME};
use innkeep::stay::parse_date;
use innkeep::{Config, ConfigBuilder, Database, DatabaseConfig, Month, RoomId, Stay};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl OutputFormat {
    /// Use the explicit flag, else the configured default.
    pub fn resolve(flag: Option<Self>, config: &Config) -> Self {
        flag.unwrap_or(match config.output_format() {
            ConfigFormat::Table => Self::Table,
            ConfigFormat::Json => Self::Json,
        })
    }
}

/// Resolve the data directory: `--data-dir` if given, else `~/.innkeep`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load layered configuration for the resolved data directory.
///
/// Precedence, highest first: global options, environment variables, the
/// data directory's `config.yaml`, built-in defaults.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    let mut overrides = Config::default();
    if let Some(seconds) = global.busy_timeout {
        overrides.maximum_lock_wait_seconds = Some(u64::from(seconds));
    }
    if global.disable_autoinit {
        overrides.disable_autoinit = Some(true);
    }

    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database in the resolved data directory.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && config.autoinit_disabled() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.maximum_lock_wait());
    Database::open(db_config).map_err(CliError::from)
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Parse a `YYYY-MM` month argument.
pub fn parse_month(value: &str) -> Result<Month, String> {
    value.parse::<Month>().map_err(|e| e.to_string())
}

/// Parse a room id argument.
pub fn parse_room_id(value: &str) -> Result<RoomId, String> {
    value.parse::<RoomId>().map_err(|e| e.to_string())
}

/// Parse a `ROOM:YYYY-MM-DD` argument.
pub fn parse_room_day(value: &str) -> Result<(RoomId, NaiveDate), String> {
    let (room, day) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ROOM:YYYY-MM-DD, got '{value}'"))?;
    Ok((parse_room_id(room)?, parse_day(day)?))
}

/// Parse an `ID:NAME` room definition.
pub fn parse_room_definition(value: &str) -> Result<(RoomId, String), String> {
    let (id, name) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ID:NAME, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("room {id} needs a name"));
    }
    Ok((parse_room_id(id)?, name.to_string()))
}

/// Build a stay from checkin and checkout arguments.
pub fn build_stay(checkin: NaiveDate, checkout: NaiveDate) -> Result<Stay, CliError> {
    Stay::new(checkin, checkout).map_err(|e| CliError::from(innkeep::Error::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_day() {
        let (room, day) = parse_room_day("2:2024-07-15").unwrap();
        assert_eq!(room.value(), 2);
        assert_eq!(day.to_string(), "2024-07-15");
    }

    #[test]
    fn test_parse_room_day_rejects_garbage() {
        assert!(parse_room_day("2024-07-15").is_err());
        assert!(parse_room_day("zero:2024-07-15").is_err());
        assert!(parse_room_day("0:2024-07-15").is_err());
        assert!(parse_room_day("1:2024-13-01").is_err());
    }

    #[test]
    fn test_parse_room_definition() {
        let (id, name) = parse_room_definition("1:General's Quarters").unwrap();
        assert_eq!(id.value(), 1);
        assert_eq!(name, "General's Quarters");
        assert!(parse_room_definition("1:  ").is_err());
    }

    #[test]
    fn test_inverted_stay_is_validation_error() {
        let err = build_stay(
            parse_day("2024-07-05").unwrap(),
            parse_day("2024-07-01").unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_output_format_falls_back_to_config() {
        let config = Config {
            output_format: Some(ConfigFormat::Json),
            ..Config::default()
        };
        assert_eq!(OutputFormat::resolve(None, &config), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Csv), &config),
            OutputFormat::Csv
        );
        assert_eq!(OutputFormat::resolve(None, &Config::default()), OutputFormat::Table);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let global = GlobalOptions {
            data_dir: Some(PathBuf::from("/tmp/inn")),
            ..GlobalOptions::default()
        };
        assert_eq!(resolve_data_dir(&global).unwrap(), PathBuf::from("/tmp/inn"));
    }
}
