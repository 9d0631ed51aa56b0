//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! currentsapi binary.

use clap::{Parser, Subcommand};

/// Currents API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "currentsapi", about = "Currents API CLI and MCP server", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the MCP server on stdio.
    Serve,

    /// List every project visible to the API key.
    Projects,

    /// List recent runs for a project.
    Runs {
        /// The project ID to list runs from.
        #[arg(long)]
        project: String,

        /// Filter runs by git branch.
        #[arg(long)]
        branch: Option<String>,

        /// Number of runs to return.
        #[arg(long)]
        limit: Option<u32>,
    },
}
