//! Command-line interface

pub mod commands;
pub mod discovery;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{RunCommand, ValidateCommand};
use std::ffi::OsString;

/// Run declarative HTTP API pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "apiline")]
#[command(version)]
#[command(about = "Run declarative HTTP API pipelines described in YAML or JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(short, long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run pipeline files, one after another
    Run(RunCommand),

    /// Load pipeline files without sending any request
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
