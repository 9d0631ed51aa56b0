//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for the Currents API,
//! allowing AI assistants to query projects, runs, spec files, test
//! results, actions, and webhooks.
//!
//! # Example
//!
//! ```no_run
//! use currentsapi::mcp::CurrentsServer;
//!
//! # fn main() -> currentsapi::Result<()> {
//! let server = CurrentsServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::CurrentsServer;
