//! Environment variable handling for configuration overrides.
//!
//! `INNKEEP_*` variables override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the lock wait.
pub const LOCK_WAIT_ENV: &str = "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides the calendar snapshot lifetime.
pub const SESSION_TTL_ENV: &str = "INNKEEP_SESSION_TTL_SECONDS";
/// Overrides automatic initialization.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";
/// Overrides the output format.
pub const OUTPUT_FORMAT_ENV: &str = "INNKEEP_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(Self::parse_seconds(LOCK_WAIT_ENV, &seconds)?);
        }

        if let Ok(seconds) = env::var(SESSION_TTL_ENV) {
            config.session_ttl_seconds = Some(Self::parse_seconds(SESSION_TTL_ENV, &seconds)?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(val.parse().map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    fn parse_seconds(field: &str, s: &str) -> Result<u64> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("must be a non-negative integer, got '{s}'"),
        })
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
