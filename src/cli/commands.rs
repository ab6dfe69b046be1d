//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run pipeline files
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Pipeline files or directories; directories are searched recursively
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Validate pipeline files
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Pipeline files or directories; directories are searched recursively
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Print the normalized pipelines as JSON
    #[arg(long)]
    pub json: bool,
}
