//! CLI argument parsing tests.

use clap::Parser;
use currentsapi::cli::{Cli, Command};

#[test]
fn cli_parses_serve_subcommand() {
    let cli = Cli::parse_from(["currentsapi", "serve"]);

    assert!(!cli.json);
    assert!(matches!(cli.command, Command::Serve));
}

#[test]
fn cli_parses_projects_subcommand() {
    let cli = Cli::parse_from(["currentsapi", "projects"]);

    assert!(!cli.json);
    assert!(matches!(cli.command, Command::Projects));
}

#[test]
fn cli_parses_projects_with_json_flag() {
    let cli = Cli::parse_from(["currentsapi", "projects", "--json"]);

    assert!(cli.json);
}

#[test]
fn cli_parses_runs_subcommand_with_filters() {
    let cli = Cli::parse_from([
        "currentsapi",
        "runs",
        "--project",
        "p1",
        "--branch",
        "main",
        "--limit",
        "25",
    ]);

    match cli.command {
        Command::Runs {
            project,
            branch,
            limit,
        } => {
            assert_eq!(project, "p1");
            assert_eq!(branch.as_deref(), Some("main"));
            assert_eq!(limit, Some(25));
        }
        _ => panic!("Expected Runs command"),
    }
}

#[test]
fn cli_runs_requires_project() {
    let result = Cli::try_parse_from(["currentsapi", "runs"]);
    assert!(result.is_err());
}
