//! CLI module for catalogd
//!
//! Provides command-line interface for:
//! - init: Write the seed collection
//! - serve: Run the HTTP API
//! - stats: One-shot stats computation

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_service, init, run, run_command, serve, stats};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
