//! Currents API client library and MCP server.
//!
//! A Rust library for interacting with the Currents test-reporting REST
//! API, plus an MCP (Model Context Protocol) server that exposes the API
//! as tools for AI assistants.
//!
//! # Quick Start
//!
//! ```no_run
//! use currentsapi::{CurrentsClient, Project};
//!
//! #[tokio::main]
//! async fn main() -> currentsapi::Result<()> {
//!     // Create client from environment variables
//!     let client = CurrentsClient::from_env()?;
//!
//!     // Get a project by ID
//!     let project = Project::get(&client, "Ab1Cd2").await?;
//!     println!("Project: {}", project.name);
//!
//!     // List every project, following pagination cursors
//!     let projects = Project::list_all(&client).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around a thin request layer and two
//! pagination walkers:
//!
//! - [`CurrentsClient`] - Authenticated HTTP access to the backend
//! - [`fetch_all_pages`] - Offset-style walker for `{status, has_more,
//!   data}` endpoints that page by repetition
//! - [`fetch_all_cursor_pages`] - Cursor walker that resumes after the
//!   last item of each page via `starting_after`
//!
//! The [`mcp`] module builds the tool surface on top of these, passing
//! most payloads through as opaque JSON.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CURRENTS_API_KEY` (required) - Your Currents API key
//! - `CURRENTS_API_URL` (optional) - Base URL (defaults to
//!   `https://api.currents.dev/v1`)

mod client;
mod error;
mod models;
mod pagination;
mod query;

pub mod cli;
pub mod mcp;

// Re-export core types
pub use client::CurrentsClient;
pub use error::{CurrentsError, Result};
pub use pagination::{
    fetch_all_cursor_pages, fetch_all_pages, CursorItem, Cursored, PaginatedResponse,
    MAX_CURSOR_PAGES,
};
pub use query::QueryBuilder;

// Re-export models
pub use models::{project_map, DataEnvelope, Project, ProjectListQuery};
