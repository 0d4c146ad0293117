//! Configuration system for innkeep.
//!
//! # Configuration Precedence
//!
//! Sources are merged from lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `config.yaml` in the data directory (`~/.innkeep` unless
//!    `INNKEEP_DATA_DIR` says otherwise)
//! 3. Environment variables (`INNKEEP_*`)
//! 4. Programmatic overrides (via `ConfigBuilder::with_config`)
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("lock wait: {:?}", config.maximum_lock_wait());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_SESSION_TTL_SECONDS};
pub use validator::ConfigValidator;
