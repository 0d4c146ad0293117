//! Library exports for innkeep-cli.
//!
//! The CLI structure is exported so tests and tooling can inspect it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
