//! CLI argument definitions using clap
//!
//! Commands:
//! - catalogd init --config <path> [--force]
//! - catalogd serve --config <path> [--port <port>]
//! - catalogd stats --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalogd - catalog browsing service backed by a JSON document
#[derive(Parser, Debug)]
#[command(name = "catalogd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and write the seed collection
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,

        /// Overwrite an existing items.json
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute stats once and print them
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
