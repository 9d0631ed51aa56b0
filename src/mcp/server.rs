//! MCP Server handler for the Currents API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::mcp::params::*;
use crate::pagination::{fetch_all_cursor_pages, CursorItem};
use crate::query::QueryBuilder;
use crate::{CurrentsClient, CurrentsError};

/// Currents MCP Server.
///
/// Implements the MCP `ServerHandler` trait, exposing the Currents REST
/// API as tools over the Model Context Protocol. Each tool validates its
/// arguments against a generated JSON schema, issues exactly one request
/// (or one pagination walk) against the backend, and returns the response
/// JSON as text content.
///
/// Backend failures never surface as protocol errors: the tool result
/// carries a plain-text `Failed to ...` message instead, with the
/// diagnostic detail in the logs.
#[derive(Clone)]
pub struct CurrentsServer {
    client: Arc<CurrentsClient>,
}

impl CurrentsServer {
    /// Create a new server from environment variables.
    ///
    /// Uses `CURRENTS_API_KEY` for authentication and optionally
    /// `CURRENTS_API_URL` for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `CURRENTS_API_KEY` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = CurrentsClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new server with an existing client.
    pub fn new(client: CurrentsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    fn json_content(value: &serde_json::Value) -> CallToolResult {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        CallToolResult::success(vec![Content::text(text)])
    }

    fn failure(message: &str, err: &CurrentsError) -> CallToolResult {
        tracing::error!(error = %err, "{message}");
        CallToolResult::error(vec![Content::text(message.to_string())])
    }

    /// GET a path and wrap the JSON response, or the failure text.
    async fn fetch(&self, path: &str, failure: &str) -> CallToolResult {
        match self.client.get_json::<serde_json::Value>(path).await {
            Ok(value) => Self::json_content(&value),
            Err(err) => Self::failure(failure, &err),
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B, failure: &str) -> CallToolResult {
        match self.client.post_json::<serde_json::Value, B>(path, body).await {
            Ok(value) => Self::json_content(&value),
            Err(err) => Self::failure(failure, &err),
        }
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B, failure: &str) -> CallToolResult {
        let result = match self.client.put(path, body).await {
            Ok(response) => response.json::<serde_json::Value>().await.map_err(Into::into),
            Err(err) => Err(err),
        };
        match result {
            Ok(value) => Self::json_content(&value),
            Err(err) => Self::failure(failure, &err),
        }
    }

    async fn put_empty(&self, path: &str, failure: &str) -> CallToolResult {
        let result = match self.client.put_empty(path).await {
            Ok(response) => response.json::<serde_json::Value>().await.map_err(Into::into),
            Err(err) => Err(err),
        };
        match result {
            Ok(value) => Self::json_content(&value),
            Err(err) => Self::failure(failure, &err),
        }
    }

    async fn delete(&self, path: &str, failure: &str) -> CallToolResult {
        let result = match self.client.delete(path).await {
            Ok(response) => response.json::<serde_json::Value>().await.map_err(Into::into),
            Err(err) => Err(err),
        };
        match result {
            Ok(value) => Self::json_content(&value),
            Err(err) => Self::failure(failure, &err),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub async fn handle_list_actions(&self, params: ListActionsParams) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query.append("projectId", &params.project_id);
        if let Some(status) = &params.status {
            query.append_each("status", status);
        }
        query.append_opt("search", params.search.as_ref());

        self.fetch(&query.into_path("actions"), "Failed to retrieve actions")
            .await
    }

    pub async fn handle_get_action(&self, params: GetActionParams) -> CallToolResult {
        self.fetch(
            &format!("actions/{}", params.action_id),
            "Failed to retrieve action",
        )
        .await
    }

    pub async fn handle_create_action(&self, params: CreateActionParams) -> CallToolResult {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            action: &'a [RuleAction],
            matcher: &'a RuleMatcher,
            #[serde(rename = "expiresAfter", skip_serializing_if = "Option::is_none")]
            expires_after: Option<&'a str>,
        }

        let body = Body {
            name: &params.name,
            description: params.description.as_deref(),
            action: &params.action,
            matcher: &params.matcher,
            expires_after: params.expires_after.as_deref(),
        };

        let mut query = QueryBuilder::new();
        query.append("projectId", &params.project_id);

        self.post(&query.into_path("actions"), &body, "Failed to create action")
            .await
    }

    pub async fn handle_update_action(&self, params: UpdateActionParams) -> CallToolResult {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            action: Option<&'a [RuleAction]>,
            #[serde(skip_serializing_if = "Option::is_none")]
            matcher: Option<&'a RuleMatcher>,
            #[serde(rename = "expiresAfter", skip_serializing_if = "Option::is_none")]
            expires_after: Option<&'a str>,
        }

        let body = Body {
            name: params.name.as_deref(),
            description: params.description.as_deref(),
            action: params.action.as_deref(),
            matcher: params.matcher.as_ref(),
            expires_after: params.expires_after.as_deref(),
        };

        self.put(
            &format!("actions/{}", params.action_id),
            &body,
            "Failed to update action",
        )
        .await
    }

    pub async fn handle_delete_action(&self, params: ActionIdParams) -> CallToolResult {
        self.delete(
            &format!("actions/{}", params.action_id),
            "Failed to delete action",
        )
        .await
    }

    pub async fn handle_enable_action(&self, params: ActionIdParams) -> CallToolResult {
        self.put_empty(
            &format!("actions/{}/enable", params.action_id),
            "Failed to enable action",
        )
        .await
    }

    pub async fn handle_disable_action(&self, params: ActionIdParams) -> CallToolResult {
        self.put_empty(
            &format!("actions/{}/disable", params.action_id),
            "Failed to disable action",
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn handle_get_projects(&self, params: GetProjectsParams) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query
            .append_opt("limit", params.limit)
            .append_opt("starting_after", params.starting_after.as_ref())
            .append_opt("ending_before", params.ending_before.as_ref());

        self.fetch(&query.into_path("projects"), "Failed to retrieve projects")
            .await
    }

    pub async fn handle_get_project(&self, params: GetProjectParams) -> CallToolResult {
        self.fetch(
            &format!("projects/{}", params.project_id),
            "Failed to retrieve project",
        )
        .await
    }

    pub async fn handle_get_project_insights(
        &self,
        params: GetProjectInsightsParams,
    ) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query
            .append("date_start", &params.date_start)
            .append("date_end", &params.date_end)
            .append_opt("resolution", params.resolution);
        if let Some(tags) = &params.tags {
            query.append_each("tags", tags);
        }
        if let Some(branches) = &params.branches {
            query.append_each("branches", branches);
        }
        if let Some(groups) = &params.groups {
            query.append_each("groups", groups);
        }
        if let Some(authors) = &params.authors {
            query.append_each("authors", authors);
        }

        let path = query.into_path(&format!("projects/{}/insights", params.project_id));
        self.fetch(&path, "Failed to retrieve project insights").await
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    pub async fn handle_get_runs(&self, params: GetRunsParams) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query
            .append("limit", params.limit.unwrap_or(10))
            .append_opt("starting_after", params.starting_after.as_ref())
            .append_opt("ending_before", params.ending_before.as_ref())
            .append_opt("branch", params.branch.as_ref());
        if let Some(tags) = &params.tag {
            query.append_each("tag[]", tags);
        }
        query
            .append_opt("tag_operator", params.tag_operator)
            .append_opt("search", params.search.as_ref());
        if let Some(authors) = &params.author {
            query.append_each("author[]", authors);
        }
        if let Some(status) = &params.status {
            query.append_each("status", status);
        }
        if let Some(states) = &params.completion_state {
            query.append_each("completion_state", states);
        }
        query
            .append_opt("date_start", params.date_start.as_ref())
            .append_opt("date_end", params.date_end.as_ref());

        tracing::info!(project_id = %params.project_id, query = %query.encode(), "fetching runs");

        let path = query.into_path(&format!("projects/{}/runs", params.project_id));
        self.fetch(&path, "Failed to retrieve runs").await
    }

    pub async fn handle_get_run_details(&self, params: RunIdParams) -> CallToolResult {
        self.fetch(
            &format!("runs/{}", params.run_id),
            "Failed to retrieve run data",
        )
        .await
    }

    pub async fn handle_find_run(&self, params: FindRunParams) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query
            .append("projectId", &params.project_id)
            .append_opt("ciBuildId", params.ci_build_id.as_ref())
            .append_opt("branch", params.branch.as_ref());
        if let Some(tags) = &params.tag {
            query.append_each("tag", tags);
        }
        query.append_opt("pwLastRun", params.pw_last_run);

        self.fetch(&query.into_path("runs/find"), "Failed to find run")
            .await
    }

    pub async fn handle_delete_run(&self, params: RunIdParams) -> CallToolResult {
        self.delete(&format!("runs/{}", params.run_id), "Failed to delete run")
            .await
    }

    pub async fn handle_cancel_run(&self, params: RunIdParams) -> CallToolResult {
        self.put_empty(
            &format!("runs/{}/cancel", params.run_id),
            "Failed to cancel run",
        )
        .await
    }

    pub async fn handle_reset_run(&self, params: RunIdParams) -> CallToolResult {
        self.put_empty(
            &format!("runs/{}/reset", params.run_id),
            "Failed to reset run",
        )
        .await
    }

    pub async fn handle_cancel_run_github_ci(
        &self,
        params: CancelRunGithubCiParams,
    ) -> CallToolResult {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            github_run_id: &'a str,
            github_run_attempt: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            project_id: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            ci_build_id: Option<&'a str>,
        }

        let body = Body {
            github_run_id: &params.github_run_id,
            github_run_attempt: params.github_run_attempt,
            project_id: params.project_id.as_deref(),
            ci_build_id: params.ci_build_id.as_deref(),
        };

        self.put(
            "runs/cancel-ci/github",
            &body,
            "Failed to cancel run by GitHub CI",
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Spec files and instances
    // -----------------------------------------------------------------------

    pub async fn handle_get_spec_instance(&self, params: GetSpecInstanceParams) -> CallToolResult {
        self.fetch(
            &format!("instances/{}", params.instance_id),
            "Failed to retrieve spec file instances",
        )
        .await
    }

    pub async fn handle_get_spec_files_performance(
        &self,
        params: GetSpecFilesPerformanceParams,
    ) -> CallToolResult {
        let from = params
            .from
            .unwrap_or_else(|| (chrono::Utc::now() - chrono::Duration::days(30)).to_rfc3339());
        let to = params.to.unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let mut query = QueryBuilder::new();
        query
            .append("date_start", from)
            .append("date_end", to)
            .append("order", params.order.unwrap_or(SpecFilesOrder::AvgDuration))
            .append(
                "dir",
                params.order_direction.unwrap_or(OrderDirection::Desc),
            )
            .append("limit", params.limit.unwrap_or(50))
            .append("page", params.page.unwrap_or(0))
            .append_opt("specNameFilter", params.spec_name_filter.as_ref());
        if let Some(tags) = &params.tags {
            query.append_each("tags[]", tags);
        }
        if let Some(branches) = &params.branches {
            query.append_each("branches[]", branches);
        }
        if let Some(authors) = &params.authors {
            query.append_each("authors[]", authors);
        }

        let path = query.into_path(&format!("spec-files/{}", params.project_id));
        self.fetch(&path, "Failed to retrieve project spec files").await
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    pub async fn handle_get_tests_performance(
        &self,
        params: GetTestsPerformanceParams,
    ) -> CallToolResult {
        let from = params.from.unwrap_or_else(|| {
            (chrono::Utc::now() - chrono::Duration::days(30))
                .format("%Y-%m-%d")
                .to_string()
        });
        let to = params
            .to
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

        let mut query = QueryBuilder::new();
        query
            .append("date_start", from)
            .append("date_end", to)
            .append("order", params.order)
            .append(
                "dir",
                params.order_direction.unwrap_or(OrderDirection::Desc),
            )
            .append("limit", params.limit.unwrap_or(50))
            .append("page", params.page.unwrap_or(0))
            .append_opt("spec", params.spec_name_filter.as_ref())
            .append_opt("test", params.test_name_filter.as_ref());
        if let Some(tags) = &params.tags {
            query.append_each("tags[]", tags);
        }
        if let Some(branches) = &params.branches {
            query.append_each("branches[]", branches);
        }
        if let Some(authors) = &params.authors {
            query.append_each("authors[]", authors);
        }

        let path = query.into_path(&format!("tests/{}", params.project_id));
        self.fetch(&path, "Failed to retrieve project tests").await
    }

    /// Historical results for one test signature. The endpoint is
    /// cursor-paginated; this handler unrolls every page.
    pub async fn handle_get_test_results(&self, params: GetTestResultsParams) -> CallToolResult {
        let date_start = (chrono::Utc::now() - chrono::Duration::days(365)).to_rfc3339();
        let date_end = chrono::Utc::now().to_rfc3339();

        let mut query = QueryBuilder::new();
        query
            .append("date_start", date_start)
            .append("date_end", date_end)
            .append("limit", 20)
            .append_opt("status", params.status);
        if let Some(tags) = &params.tags {
            query.append_each("tag[]", tags);
        }
        if let Some(branches) = &params.branches {
            query.append_each("branch[]", branches);
        }
        if let Some(authors) = &params.authors {
            query.append_each("git_author[]", authors);
        }

        tracing::info!(signature = %params.signature, query = %query.encode(), "fetching test results");

        let path = query.into_path(&format!("test-results/{}", params.signature));
        match fetch_all_cursor_pages::<CursorItem>(&self.client, &path).await {
            Ok(items) => {
                let value = serde_json::to_value(&items)
                    .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
                Self::json_content(&value)
            }
            Err(err) => Self::failure("Failed to retrieve test results", &err),
        }
    }

    pub async fn handle_get_test_signature(
        &self,
        params: GetTestSignatureParams,
    ) -> CallToolResult {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            project_id: &'a str,
            spec_file_path: &'a str,
            test_title: &'a TestTitle,
        }

        let body = Body {
            project_id: &params.project_id,
            spec_file_path: &params.spec_file_path,
            test_title: &params.test_title,
        };

        self.post("signature/test", &body, "Failed to generate test signature")
            .await
    }

    // -----------------------------------------------------------------------
    // Webhooks
    // -----------------------------------------------------------------------

    pub async fn handle_list_webhooks(&self, params: ListWebhooksParams) -> CallToolResult {
        let mut query = QueryBuilder::new();
        query.append("projectId", &params.project_id);

        self.fetch(&query.into_path("webhooks"), "Failed to retrieve webhooks")
            .await
    }

    pub async fn handle_get_webhook(&self, params: WebhookIdParams) -> CallToolResult {
        self.fetch(
            &format!("webhooks/{}", params.hook_id),
            "Failed to retrieve webhook",
        )
        .await
    }

    pub async fn handle_create_webhook(&self, params: CreateWebhookParams) -> CallToolResult {
        #[derive(Serialize)]
        struct Body<'a> {
            url: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            headers: Option<&'a str>,
            #[serde(rename = "hookEvents", skip_serializing_if = "Option::is_none")]
            hook_events: Option<&'a [HookEvent]>,
            #[serde(skip_serializing_if = "Option::is_none")]
            label: Option<&'a str>,
        }

        let body = Body {
            url: &params.url,
            headers: params.headers.as_deref(),
            hook_events: params.hook_events.as_deref(),
            label: params.label.as_deref(),
        };

        let mut query = QueryBuilder::new();
        query.append("projectId", &params.project_id);

        self.post(
            &query.into_path("webhooks"),
            &body,
            "Failed to create webhook",
        )
        .await
    }

    pub async fn handle_update_webhook(&self, params: UpdateWebhookParams) -> CallToolResult {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            url: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            headers: Option<&'a str>,
            #[serde(rename = "hookEvents", skip_serializing_if = "Option::is_none")]
            hook_events: Option<&'a [HookEvent]>,
            #[serde(skip_serializing_if = "Option::is_none")]
            label: Option<&'a str>,
        }

        let body = Body {
            url: params.url.as_deref(),
            headers: params.headers.as_deref(),
            hook_events: params.hook_events.as_deref(),
            label: params.label.as_deref(),
        };

        self.put(
            &format!("webhooks/{}", params.hook_id),
            &body,
            "Failed to update webhook",
        )
        .await
    }

    pub async fn handle_delete_webhook(&self, params: WebhookIdParams) -> CallToolResult {
        self.delete(
            &format!("webhooks/{}", params.hook_id),
            "Failed to delete webhook",
        )
        .await
    }
}

impl ServerHandler for CurrentsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "currents".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Currents API MCP Server - Query projects, runs, spec files, test results, \
                 actions, and webhooks on the Currents test-reporting platform."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            // Actions API
            Tool::new(
                "currents-list-actions",
                "Retrieves a list of test actions (rules) for a project. Actions can skip, \
                 quarantine, or tag tests automatically based on conditions. Supports filtering \
                 by status (active/disabled/archived/expired) and searching by name. Requires a \
                 projectId.",
                Self::schema::<ListActionsParams>(),
            ),
            Tool::new(
                "currents-get-action",
                "Retrieves details of a specific action by actionId. The actionId is globally \
                 unique, so projectId is not required.",
                Self::schema::<GetActionParams>(),
            ),
            Tool::new(
                "currents-create-action",
                "Creates a new action (rule) for a project. Actions can automatically skip, \
                 quarantine, or tag tests that match specified conditions based on test title, \
                 file path, git branch, error messages, etc. Requires projectId, name, action \
                 array, and matcher object.",
                Self::schema::<CreateActionParams>(),
            ),
            Tool::new(
                "currents-update-action",
                "Updates an existing action. The actionId is globally unique, so projectId is \
                 not required. All fields are optional - only provided fields will be updated.",
                Self::schema::<UpdateActionParams>(),
            ),
            Tool::new(
                "currents-delete-action",
                "Deletes (archives) an action. The actionId is globally unique, so projectId is \
                 not required. This is a soft delete.",
                Self::schema::<ActionIdParams>(),
            ),
            Tool::new(
                "currents-enable-action",
                "Enables a disabled action. The actionId is globally unique, so projectId is \
                 not required.",
                Self::schema::<ActionIdParams>(),
            ),
            Tool::new(
                "currents-disable-action",
                "Disables an active action. The actionId is globally unique, so projectId is \
                 not required.",
                Self::schema::<ActionIdParams>(),
            ),
            // Projects API
            Tool::new(
                "currents-get-projects",
                "Retrieves a list of all projects available in the Currents platform with \
                 optional pagination. Supports limit, starting_after, and ending_before \
                 parameters for cursor-based pagination. This is a prerequisite for using any \
                 other tools that require project-specific information.",
                Self::schema::<GetProjectsParams>(),
            ),
            Tool::new(
                "currents-get-project",
                "Retrieves details of a specific project by projectId. Returns project \
                 information including name, creation date, fail-fast settings, inactivity \
                 timeout, and default branch.",
                Self::schema::<GetProjectParams>(),
            ),
            Tool::new(
                "currents-get-project-insights",
                "Retrieves aggregated run and test metrics for a project within a date range. \
                 Returns overall and timeline metrics including run counts, test counts, \
                 success rates, and duration statistics. Supports filtering by tags, branches, \
                 groups, and authors. Requires projectId, date_start, and date_end.",
                Self::schema::<GetProjectInsightsParams>(),
            ),
            // Runs API
            Tool::new(
                "currents-get-runs",
                "Retrieves a list of runs for a specific project with optional filtering and \
                 pagination. Supports filtering by branch, tags (with AND/OR operators), status \
                 (PASSED/FAILED/RUNNING/FAILING), completion state, date range, commit author, \
                 and search by ciBuildId or commit message. Requires a projectId.",
                Self::schema::<GetRunsParams>(),
            ),
            Tool::new(
                "currents-get-run-details",
                "Retrieves details of a specific test run by runId. Returns comprehensive run \
                 information including specs, groups, test counts, status, duration, timeout, \
                 and cancellation details.",
                Self::schema::<RunIdParams>(),
            ),
            Tool::new(
                "currents-find-run",
                "Finds a run by query parameters. Returns the most recent completed run \
                 matching the criteria. Can search by projectId, ciBuildId, branch, tags, and \
                 optionally include Playwright last run information.",
                Self::schema::<FindRunParams>(),
            ),
            Tool::new(
                "currents-delete-run",
                "Deletes a run and all associated data. Requires a runId. This is a permanent \
                 operation.",
                Self::schema::<RunIdParams>(),
            ),
            Tool::new(
                "currents-cancel-run",
                "Cancels a run that is currently in progress. Requires a runId.",
                Self::schema::<RunIdParams>(),
            ),
            Tool::new(
                "currents-reset-run",
                "Resets failed spec files in a run to allow re-execution. Requires a runId.",
                Self::schema::<RunIdParams>(),
            ),
            Tool::new(
                "currents-cancel-run-github-ci",
                "Cancels a run by GitHub Actions workflow run ID and attempt number. Optionally \
                 accepts projectId and ciBuildId to scope the cancellation.",
                Self::schema::<CancelRunGithubCiParams>(),
            ),
            // Instances API
            Tool::new(
                "currents-get-spec-instance",
                "Retrieves debugging data from a specific execution of a test spec file by \
                 instanceId. Returns detailed test results, stats, and execution information.",
                Self::schema::<GetSpecInstanceParams>(),
            ),
            // Spec Files API
            Tool::new(
                "currents-get-spec-files-performance",
                "Retrieves spec files performance metrics for a specific project within a date \
                 range. Supports ordering by avgDuration, failedExecutions, failureRate, \
                 flakeRate, flakyExecutions, fullyReported, overallExecutions, suiteSize, \
                 timeoutExecutions, or timeoutRate. Supports filtering by tags, branches, \
                 groups, authors, and spec name. Uses page-based pagination.",
                Self::schema::<GetSpecFilesPerformanceParams>(),
            ),
            // Tests Explorer API
            Tool::new(
                "currents-get-tests-performance",
                "Retrieves aggregated test metrics for a specific project within a date range \
                 (Tests Explorer). Supports ordering by failures, passes, flakiness, duration, \
                 executions, title, and various delta metrics. Supports filtering by spec name, \
                 test title, tags, branches, groups, authors, minimum executions, and test \
                 state. Uses page-based pagination.",
                Self::schema::<GetTestsPerformanceParams>(),
            ),
            // Test Results API
            Tool::new(
                "currents-get-test-results",
                "Retrieves historical test execution results for a specific test signature, \
                 following cursor-based pagination until exhaustion. Supports filtering by \
                 branch, tags, git author, and test status (passed/failed/pending/skipped). \
                 Requires the test signature.",
                Self::schema::<GetTestResultsParams>(),
            ),
            // Signature API
            Tool::new(
                "currents-get-tests-signatures",
                "Generates a unique test signature based on project, spec file path, and test \
                 title. The test title can be a string or array of strings (for nested describe \
                 blocks). Requires projectId, specFilePath, and testTitle.",
                Self::schema::<GetTestSignatureParams>(),
            ),
            // Webhooks API
            Tool::new(
                "currents-list-webhooks",
                "Retrieves the webhooks configured for a project. Requires a projectId.",
                Self::schema::<ListWebhooksParams>(),
            ),
            Tool::new(
                "currents-get-webhook",
                "Retrieves details of a specific webhook by hookId.",
                Self::schema::<WebhookIdParams>(),
            ),
            Tool::new(
                "currents-create-webhook",
                "Creates a webhook for a project. Requires projectId and url; optionally \
                 accepts custom headers, triggering events (RUN_FINISH/RUN_START/RUN_TIMEOUT/\
                 RUN_CANCELED), and a label.",
                Self::schema::<CreateWebhookParams>(),
            ),
            Tool::new(
                "currents-update-webhook",
                "Updates an existing webhook. All fields are optional - only provided fields \
                 will be updated.",
                Self::schema::<UpdateWebhookParams>(),
            ),
            Tool::new(
                "currents-delete-webhook",
                "Deletes a webhook. Requires the hookId.",
                Self::schema::<WebhookIdParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        fn parse<T: serde::de::DeserializeOwned>(args: serde_json::Value) -> Result<T, McpError> {
            serde_json::from_value(args).map_err(|e| McpError::invalid_params(e.to_string(), None))
        }

        let result = match request.name.as_ref() {
            "currents-list-actions" => self.handle_list_actions(parse(args)?).await,
            "currents-get-action" => self.handle_get_action(parse(args)?).await,
            "currents-create-action" => self.handle_create_action(parse(args)?).await,
            "currents-update-action" => self.handle_update_action(parse(args)?).await,
            "currents-delete-action" => self.handle_delete_action(parse(args)?).await,
            "currents-enable-action" => self.handle_enable_action(parse(args)?).await,
            "currents-disable-action" => self.handle_disable_action(parse(args)?).await,
            "currents-get-projects" => self.handle_get_projects(parse(args)?).await,
            "currents-get-project" => self.handle_get_project(parse(args)?).await,
            "currents-get-project-insights" => {
                self.handle_get_project_insights(parse(args)?).await
            }
            "currents-get-runs" => self.handle_get_runs(parse(args)?).await,
            "currents-get-run-details" => self.handle_get_run_details(parse(args)?).await,
            "currents-find-run" => self.handle_find_run(parse(args)?).await,
            "currents-delete-run" => self.handle_delete_run(parse(args)?).await,
            "currents-cancel-run" => self.handle_cancel_run(parse(args)?).await,
            "currents-reset-run" => self.handle_reset_run(parse(args)?).await,
            "currents-cancel-run-github-ci" => {
                self.handle_cancel_run_github_ci(parse(args)?).await
            }
            "currents-get-spec-instance" => self.handle_get_spec_instance(parse(args)?).await,
            "currents-get-spec-files-performance" => {
                self.handle_get_spec_files_performance(parse(args)?).await
            }
            "currents-get-tests-performance" => {
                self.handle_get_tests_performance(parse(args)?).await
            }
            "currents-get-test-results" => self.handle_get_test_results(parse(args)?).await,
            "currents-get-tests-signatures" => self.handle_get_test_signature(parse(args)?).await,
            "currents-list-webhooks" => self.handle_list_webhooks(parse(args)?).await,
            "currents-get-webhook" => self.handle_get_webhook(parse(args)?).await,
            "currents-create-webhook" => self.handle_create_webhook(parse(args)?).await,
            "currents-update-webhook" => self.handle_update_webhook(parse(args)?).await,
            "currents-delete-webhook" => self.handle_delete_webhook(parse(args)?).await,
            other => {
                return Err(McpError::invalid_params(
                    format!("Unknown tool: {other}"),
                    None,
                ))
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(mock: &MockServer) -> CurrentsServer {
        let client = CurrentsClient::new("test-token", &mock.uri()).unwrap();
        CurrentsServer::new(client)
    }

    fn content_text(result: &CallToolResult) -> &str {
        result.content[0]
            .raw
            .as_text()
            .expect("Expected text content")
            .text
            .as_str()
    }

    #[test]
    fn schema_generates_for_params() {
        assert!(!CurrentsServer::schema::<GetRunsParams>().is_empty());
        assert!(!CurrentsServer::schema::<CreateActionParams>().is_empty());
        assert!(!CurrentsServer::schema::<GetTestResultsParams>().is_empty());
    }

    #[test]
    fn server_implements_server_handler() {
        fn assert_server_handler<T: ServerHandler>() {}
        assert_server_handler::<CurrentsServer>();
    }

    #[tokio::test]
    async fn handle_get_run_details_returns_run_json() {
        let mock_server = MockServer::start().await;

        let run = serde_json::json!({
            "status": "OK",
            "data": {"runId": "r1", "projectId": "p1", "status": "PASSED"}
        });

        Mock::given(method("GET"))
            .and(path("/runs/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&run))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_run_details(RunIdParams {
                run_id: "r1".to_string(),
            })
            .await;

        assert!(!result.is_error.unwrap_or(false));
        let value: serde_json::Value = serde_json::from_str(content_text(&result)).unwrap();
        assert_eq!(value["data"]["runId"], "r1");
    }

    #[tokio::test]
    async fn handle_get_run_details_failure_returns_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/runs/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_run_details(RunIdParams {
                run_id: "missing".to_string(),
            })
            .await;

        assert!(result.is_error.unwrap_or(false));
        assert_eq!(content_text(&result), "Failed to retrieve run data");
    }

    #[tokio::test]
    async fn handle_get_runs_builds_filter_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/p1/runs"))
            .and(query_param("limit", "10"))
            .and(query_param("branch", "main"))
            .and(query_param("tag_operator", "OR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK", "has_more": false, "data": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_runs(GetRunsParams {
                project_id: "p1".to_string(),
                limit: None,
                starting_after: None,
                ending_before: None,
                branch: Some("main".to_string()),
                tag: Some(vec!["smoke".to_string()]),
                tag_operator: Some(TagOperator::Or),
                search: None,
                author: None,
                status: None,
                completion_state: None,
                date_start: None,
                date_end: None,
            })
            .await;

        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn handle_create_action_posts_body_with_project_query() {
        let mock_server = MockServer::start().await;

        let expected_body = serde_json::json!({
            "name": "skip flaky",
            "action": [{"op": "skip"}],
            "matcher": {"op": "AND", "cond": [{"type": "tag", "op": "inc", "value": "flaky"}]}
        });

        Mock::given(method("POST"))
            .and(path("/actions"))
            .and(query_param("projectId", "p1"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK", "data": {"actionId": "a1"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let params: CreateActionParams = serde_json::from_value(serde_json::json!({
            "projectId": "p1",
            "name": "skip flaky",
            "action": [{"op": "skip"}],
            "matcher": {"op": "AND", "cond": [{"type": "tag", "op": "inc", "value": "flaky"}]}
        }))
        .unwrap();

        let result = server.handle_create_action(params).await;
        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn handle_enable_action_puts_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/actions/a1/enable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK", "data": {"actionId": "a1", "enabled": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_enable_action(ActionIdParams {
                action_id: "a1".to_string(),
            })
            .await;
        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn handle_delete_webhook_issues_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/webhooks/h1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK", "data": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_delete_webhook(WebhookIdParams {
                hook_id: "h1".to_string(),
            })
            .await;
        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn handle_get_test_results_unrolls_cursor_pages() {
        let mock_server = MockServer::start().await;

        let page1 = serde_json::json!({
            "status": "OK",
            "has_more": true,
            "data": [{"instanceId": "i1", "cursor": "c1"}]
        });
        let page2 = serde_json::json!({
            "status": "OK",
            "has_more": false,
            "data": [{"instanceId": "i2", "cursor": "c2"}]
        });

        Mock::given(method("GET"))
            .and(path("/test-results/sig"))
            .and(query_param("starting_after", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&page2))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/test-results/sig"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_test_results(GetTestResultsParams {
                signature: "sig".to_string(),
                tags: None,
                branches: None,
                authors: None,
                status: None,
            })
            .await;

        assert!(!result.is_error.unwrap_or(false));
        let items: serde_json::Value = serde_json::from_str(content_text(&result)).unwrap();
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["instanceId"], "i1");
        assert_eq!(items[1]["instanceId"], "i2");
    }
}
