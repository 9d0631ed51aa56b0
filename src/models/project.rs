//! Project model and operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::CurrentsClient;
use crate::error::Result;
use crate::pagination::{fetch_all_cursor_pages, Cursored, PaginatedResponse};

/// The `{status, data}` envelope returned by single-entity endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// Request status as reported by the backend.
    pub status: String,
    /// The entity payload.
    pub data: T,
}

/// A Currents project.
///
/// Projects are the top-level containers for recorded test runs. The list
/// endpoint is cursor-paginated; each listed project carries a `cursor`
/// used to resume listing after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project identifier.
    pub project_id: String,

    /// Human-readable project name.
    pub name: String,

    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether fail-fast mode is enabled.
    #[serde(default)]
    pub fail_fast: Option<bool>,

    /// Run inactivity timeout in seconds.
    #[serde(default)]
    pub inactivity_timeout_seconds: Option<u64>,

    /// Default git branch.
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Pagination cursor (present on list responses).
    #[serde(default)]
    pub cursor: Option<String>,
}

impl Cursored for Project {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListQuery {
    /// Maximum number of items to return (default 10, max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Return items after this cursor value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Return items before this cursor value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
}

impl Project {
    /// Fetch a single project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(client: &CurrentsClient, project_id: &str) -> Result<Self> {
        let envelope: DataEnvelope<Self> =
            client.get_json(&format!("projects/{project_id}")).await?;
        Ok(envelope.data)
    }

    /// Fetch a single page of projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        client: &CurrentsClient,
        query: &ProjectListQuery,
    ) -> Result<PaginatedResponse<Self>> {
        client.get_json_with_query("projects", query).await
    }

    /// Fetch every project, following cursors until exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn list_all(client: &CurrentsClient) -> Result<Vec<Self>> {
        fetch_all_cursor_pages(client, "projects").await
    }
}

/// Build a name → project map of every project visible to the token.
///
/// # Errors
///
/// Returns an error if any page request fails.
pub async fn project_map(client: &CurrentsClient) -> Result<HashMap<String, Project>> {
    let projects = Project::list_all(client).await?;
    Ok(projects.into_iter().map(|p| (p.name.clone(), p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_deserializes_from_list_item() {
        let json = r#"{
            "projectId": "Ab1Cd2",
            "name": "web-app",
            "createdAt": "2024-03-01T12:00:00Z",
            "failFast": true,
            "inactivityTimeoutSeconds": 600,
            "defaultBranch": "main",
            "cursor": "Ab1Cd2"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_id, "Ab1Cd2");
        assert_eq!(project.name, "web-app");
        assert_eq!(project.default_branch.as_deref(), Some("main"));
        assert_eq!(project.cursor(), Some("Ab1Cd2"));
    }

    #[test]
    fn project_tolerates_minimal_payload() {
        let project: Project =
            serde_json::from_str(r#"{"projectId": "p1", "name": "api"}"#).unwrap();
        assert!(project.created_at.is_none());
        assert!(project.cursor().is_none());
    }

    #[test]
    fn list_query_serializes_only_set_fields() {
        let query = ProjectListQuery {
            limit: Some(50),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({"limit": 50}));
    }
}
