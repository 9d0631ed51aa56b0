//! Currents API CLI binary.
//!
//! Runs the MCP server on stdio, or offers small convenience commands for
//! listing projects and runs from a terminal.

use clap::Parser;
use currentsapi::cli::{Cli, Command};
use currentsapi::mcp::CurrentsServer;
use currentsapi::{CurrentsClient, Project, QueryBuilder};
use rmcp::{transport::stdio, ServiceExt};
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the MCP JSON-RPC stream, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match CurrentsClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CURRENTS_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: CurrentsClient, cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Serve => serve(client).await,
        Command::Projects => list_projects(&client, cli.json).await,
        Command::Runs {
            project,
            branch,
            limit,
        } => list_runs(&client, &project, branch.as_deref(), limit, cli.json).await,
    }
}

async fn serve(client: CurrentsClient) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("starting Currents MCP server on stdio");
    let server = CurrentsServer::new(client);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

async fn list_projects(
    client: &CurrentsClient,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let projects = Project::list_all(client).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
        println!("{}", Table::new(rows));
        println!("\n{} projects", projects.len());
    }
    Ok(())
}

async fn list_runs(
    client: &CurrentsClient,
    project_id: &str,
    branch: Option<&str>,
    limit: Option<u32>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query = QueryBuilder::new();
    query
        .append("limit", limit.unwrap_or(10))
        .append_opt("branch", branch);

    let path = query.into_path(&format!("projects/{project_id}/runs"));
    let response: serde_json::Value = client.get_json(&path).await?;
    let runs = response["data"].as_array().cloned().unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    } else {
        let rows: Vec<RunRow> = runs.iter().map(RunRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    id: String,
    name: String,
    #[tabled(rename = "default branch")]
    default_branch: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.project_id.clone(),
            name: p.name.clone(),
            default_branch: p.default_branch.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "run id")]
    run_id: String,
    status: String,
    branch: String,
    created: String,
}

impl From<&serde_json::Value> for RunRow {
    fn from(run: &serde_json::Value) -> Self {
        let text = |v: &serde_json::Value| v.as_str().unwrap_or_default().to_string();
        Self {
            run_id: text(&run["runId"]),
            status: text(&run["status"]),
            branch: text(&run["meta"]["commit"]["branch"]),
            created: text(&run["createdAt"]),
        }
    }
}
