//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest accepted lock wait, one hour.
const MAX_LOCK_WAIT_SECONDS: u64 = 60 * 60;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero = Config { session_ttl_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "timeout must be greater than 0".into(),
                });
            }
            if timeout > MAX_LOCK_WAIT_SECONDS {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!("timeout must not exceed {MAX_LOCK_WAIT_SECONDS} seconds"),
                });
            }
        }

        if config.session_ttl_seconds == Some(0) {
            return Err(Error::Validation {
                field: "session_ttl_seconds".into(),
                message: "session lifetime must be greater than 0".into(),
            });
        }

        Ok(())
    }
}
