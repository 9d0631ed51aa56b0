//! MCP tool parameter types with JSON Schema support.
//!
//! One struct per tool; doc comments become the schema descriptions the
//! agent host shows to the model. Field names mirror the backend's wire
//! names (`projectId` camel case, `starting_after` snake case), so the
//! serde renames below are deliberate, not stylistic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operator for combining multiple tag filters.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagOperator {
    /// All tags must be present (default).
    And,
    /// Any tag may be present.
    Or,
}

impl fmt::Display for TagOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Lifecycle status of an action.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Active,
    Disabled,
    Archived,
    Expired,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Archived => "archived",
            Self::Expired => "expired",
        })
    }
}

/// Parameters for `currents-list-actions`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListActionsParams {
    /// The project ID to fetch actions from.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// Filter actions by status (can be specified multiple times).
    #[serde(default)]
    pub status: Option<Vec<ActionStatus>>,
    /// Search actions by name.
    #[serde(default)]
    pub search: Option<String>,
}

/// Parameters for `currents-get-action`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetActionParams {
    /// The action ID.
    #[serde(rename = "actionId")]
    pub action_id: String,
}

/// An operation an action performs on matching tests.
///
/// `op` is one of `skip`, `quarantine`, or `tag`; the `tag` op carries a
/// `details.tags` array of up to 10 tags.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleAction {
    /// The operation: `skip`, `quarantine`, or `tag`.
    pub op: String,
    /// Operation details (`{"tags": [...]}` for the `tag` op).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A single matcher condition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleCondition {
    /// Field to match: `testId`, `project`, `title`, `file`, `git_branch`,
    /// `git_authorName`, `git_authorEmail`, `git_remoteOrigin`,
    /// `git_message`, `error_message`, `titlePath`, `annotation`, or `tag`.
    #[serde(rename = "type")]
    pub condition_type: String,
    /// Comparison operator: `eq`, `neq`, `any`, `empty`, `in`, `notIn`,
    /// `inc`, `notInc`, `incAll`, or `notIncAll`.
    pub op: String,
    /// Value(s) to compare against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Matcher defining which tests an action applies to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleMatcher {
    /// How to combine multiple conditions: `AND` or `OR`.
    pub op: String,
    /// List of conditions to match.
    pub cond: Vec<RuleCondition>,
}

/// Parameters for `currents-create-action`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateActionParams {
    /// The project ID to create the action for.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// Human-readable name for the action.
    pub name: String,
    /// Optional description for the action.
    #[serde(default)]
    pub description: Option<String>,
    /// Actions to perform when conditions match.
    pub action: Vec<RuleAction>,
    /// Matcher defining which tests this action applies to.
    pub matcher: RuleMatcher,
    /// Optional expiration date in ISO 8601 format.
    #[serde(default, rename = "expiresAfter")]
    pub expires_after: Option<String>,
}

/// Parameters for `currents-update-action`. All fields but the ID are
/// optional; only provided fields are updated.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateActionParams {
    /// The action ID to update.
    #[serde(rename = "actionId")]
    pub action_id: String,
    /// New name for the action.
    #[serde(default)]
    pub name: Option<String>,
    /// New description for the action.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement list of operations.
    #[serde(default)]
    pub action: Option<Vec<RuleAction>>,
    /// Replacement matcher.
    #[serde(default)]
    pub matcher: Option<RuleMatcher>,
    /// New expiration date in ISO 8601 format.
    #[serde(default, rename = "expiresAfter")]
    pub expires_after: Option<String>,
}

/// Parameters for `currents-delete-action`, `currents-enable-action`, and
/// `currents-disable-action`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ActionIdParams {
    /// The action ID.
    #[serde(rename = "actionId")]
    pub action_id: String,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Parameters for `currents-get-projects`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProjectsParams {
    /// Maximum number of items to return (default: 10, max: 100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Cursor for pagination. Returns items after this cursor value.
    #[serde(default)]
    pub starting_after: Option<String>,
    /// Cursor for pagination. Returns items before this cursor value.
    #[serde(default)]
    pub ending_before: Option<String>,
}

/// Parameters for `currents-get-project`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProjectParams {
    /// The project ID.
    #[serde(rename = "projectId")]
    pub project_id: String,
}

/// Histogram resolution for insights timelines.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub enum InsightsResolution {
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
}

impl fmt::Display for InsightsResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hour => "1h",
            Self::Day => "1d",
            Self::Week => "1w",
        })
    }
}

/// Parameters for `currents-get-project-insights`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProjectInsightsParams {
    /// The project ID to fetch insights from.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// Start date in ISO 8601 format.
    pub date_start: String,
    /// End date in ISO 8601 format.
    pub date_end: String,
    /// Time resolution for histogram data. Defaults to `1d`.
    #[serde(default)]
    pub resolution: Option<InsightsResolution>,
    /// Filter by tags (can be specified multiple times).
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Filter by branches (can be specified multiple times).
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    /// Filter by groups (can be specified multiple times).
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    /// Filter by git authors (can be specified multiple times).
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// Run outcome status.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// All tests passed.
    Passed,
    /// Some tests failed.
    Failed,
    /// Run is in progress and passing.
    Running,
    /// Run is in progress but has failures.
    Failing,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Running => "RUNNING",
            Self::Failing => "FAILING",
        })
    }
}

/// Run completion state.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionState {
    /// Run finished normally.
    Complete,
    /// Run is still executing.
    InProgress,
    /// Run was canceled.
    Canceled,
    /// Run timed out.
    Timeout,
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Complete => "COMPLETE",
            Self::InProgress => "IN_PROGRESS",
            Self::Canceled => "CANCELED",
            Self::Timeout => "TIMEOUT",
        })
    }
}

/// Parameters for `currents-get-runs`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRunsParams {
    /// The project ID to fetch runs from.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// The maximum number of results to return per page (default: 10, max: 100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Cursor for pagination. Returns items after this cursor value.
    #[serde(default)]
    pub starting_after: Option<String>,
    /// Cursor for pagination. Returns items before this cursor value.
    #[serde(default)]
    pub ending_before: Option<String>,
    /// Filter runs by git branch name.
    #[serde(default)]
    pub branch: Option<String>,
    /// Filter runs by tags (can be specified multiple times). Use
    /// `tag_operator` to control matching behavior.
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    /// Logical operator for tag filtering.
    #[serde(default)]
    pub tag_operator: Option<TagOperator>,
    /// Search runs by ciBuildId or commit message. Case-insensitive.
    #[serde(default)]
    pub search: Option<String>,
    /// Filter runs by git commit author name (can be specified multiple times).
    #[serde(default)]
    pub author: Option<Vec<String>>,
    /// Filter runs by status.
    #[serde(default)]
    pub status: Option<Vec<RunStatus>>,
    /// Filter runs by completion state.
    #[serde(default)]
    pub completion_state: Option<Vec<CompletionState>>,
    /// Filter runs created on or after this date (ISO 8601 format).
    #[serde(default)]
    pub date_start: Option<String>,
    /// Filter runs created before this date (ISO 8601 format).
    #[serde(default)]
    pub date_end: Option<String>,
}

/// Parameters for `currents-get-run-details`, `currents-delete-run`,
/// `currents-cancel-run`, and `currents-reset-run`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunIdParams {
    /// The run ID.
    #[serde(rename = "runId")]
    pub run_id: String,
}

/// Parameters for `currents-find-run`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindRunParams {
    /// The project ID to search within.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// The CI build ID. If provided, returns the run with this exact ciBuildId.
    #[serde(default, rename = "ciBuildId")]
    pub ci_build_id: Option<String>,
    /// Git branch name. Used when ciBuildId is not provided.
    #[serde(default)]
    pub branch: Option<String>,
    /// Run tags to filter by (can be specified multiple times).
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    /// If true, includes information about failed tests from the last run
    /// (Playwright only).
    #[serde(default, rename = "pwLastRun")]
    pub pw_last_run: Option<bool>,
}

/// Parameters for `currents-cancel-run-github-ci`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CancelRunGithubCiParams {
    /// GitHub Actions workflow run ID.
    #[serde(rename = "githubRunId")]
    pub github_run_id: String,
    /// GitHub Actions workflow run attempt number.
    #[serde(rename = "githubRunAttempt")]
    pub github_run_attempt: u64,
    /// Optional project ID to scope the cancellation.
    #[serde(default, rename = "projectId")]
    pub project_id: Option<String>,
    /// Optional CI build ID to scope the cancellation.
    #[serde(default, rename = "ciBuildId")]
    pub ci_build_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Spec files and instances
// ---------------------------------------------------------------------------

/// Parameters for `currents-get-spec-instance`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSpecInstanceParams {
    /// The instance ID to fetch debugging data from.
    #[serde(rename = "instanceId")]
    pub instance_id: String,
}

/// Ordering for spec file performance metrics.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SpecFilesOrder {
    FailedExecutions,
    FailureRate,
    FlakeRate,
    FlakyExecutions,
    FullyReported,
    OverallExecutions,
    SuiteSize,
    TimeoutExecutions,
    TimeoutRate,
    AvgDuration,
}

impl fmt::Display for SpecFilesOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FailedExecutions => "failedExecutions",
            Self::FailureRate => "failureRate",
            Self::FlakeRate => "flakeRate",
            Self::FlakyExecutions => "flakyExecutions",
            Self::FullyReported => "fullyReported",
            Self::OverallExecutions => "overallExecutions",
            Self::SuiteSize => "suiteSize",
            Self::TimeoutExecutions => "timeoutExecutions",
            Self::TimeoutRate => "timeoutRate",
            Self::AvgDuration => "avgDuration",
        })
    }
}

/// Parameters for `currents-get-spec-files-performance`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSpecFilesPerformanceParams {
    /// The project ID to fetch spec file metrics from.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// The start of the date range. ISO 8601 date. Defaults to 30 days ago.
    #[serde(default)]
    pub from: Option<String>,
    /// The end of the date range. ISO 8601 date. Defaults to now.
    #[serde(default)]
    pub to: Option<String>,
    /// The spec name to filter by. If not provided, a paginated response of
    /// all spec files will be returned.
    #[serde(default, rename = "specNameFilter")]
    pub spec_name_filter: Option<String>,
    /// Metric to order by. Defaults to `avgDuration`.
    #[serde(default)]
    pub order: Option<SpecFilesOrder>,
    /// Sort direction. Defaults to `desc`.
    #[serde(default, rename = "orderDirection")]
    pub order_direction: Option<OrderDirection>,
    /// Page size. Defaults to 50.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Zero-indexed page number. Defaults to 0.
    #[serde(default)]
    pub page: Option<u32>,
    /// Filter by tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Filter by branches.
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    /// Filter by git authors.
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Ordering for Tests Explorer metrics.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TestsOrder {
    Duration,
    Executions,
    Failures,
    Flakiness,
    Passes,
    Title,
    #[serde(rename = "durationXSamples")]
    DurationXSamples,
    #[serde(rename = "failRateXSamples")]
    FailRateXSamples,
    FailureRateDelta,
    FlakinessRateDelta,
    #[serde(rename = "flakinessXSamples")]
    FlakinessXSamples,
}

impl fmt::Display for TestsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Duration => "duration",
            Self::Executions => "executions",
            Self::Failures => "failures",
            Self::Flakiness => "flakiness",
            Self::Passes => "passes",
            Self::Title => "title",
            Self::DurationXSamples => "durationXSamples",
            Self::FailRateXSamples => "failRateXSamples",
            Self::FailureRateDelta => "failureRateDelta",
            Self::FlakinessRateDelta => "flakinessRateDelta",
            Self::FlakinessXSamples => "flakinessXSamples",
        })
    }
}

/// Parameters for `currents-get-tests-performance`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTestsPerformanceParams {
    /// The project ID to fetch test metrics from.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// The start of the date range. ISO 8601 date without the time part.
    /// Defaults to 30 days ago.
    #[serde(default)]
    pub from: Option<String>,
    /// The end of the date range. ISO 8601 date without the time part.
    /// Defaults to today.
    #[serde(default)]
    pub to: Option<String>,
    /// The spec name to filter by.
    #[serde(default, rename = "specNameFilter")]
    pub spec_name_filter: Option<String>,
    /// The test name to filter by.
    #[serde(default, rename = "testNameFilter")]
    pub test_name_filter: Option<String>,
    /// Metric to order by.
    pub order: TestsOrder,
    /// Sort direction. Defaults to `desc`.
    #[serde(default, rename = "orderDirection")]
    pub order_direction: Option<OrderDirection>,
    /// Page size. Defaults to 50.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Zero-indexed page number. Defaults to 0.
    #[serde(default)]
    pub page: Option<u32>,
    /// Filter by tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Filter by branches.
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    /// Filter by git authors.
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

/// Test execution outcome.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Failed,
    Passed,
    Skipped,
    Pending,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Failed => "failed",
            Self::Passed => "passed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
        })
    }
}

/// Parameters for `currents-get-test-results`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTestResultsParams {
    /// The test signature.
    pub signature: String,
    /// Filter results by test tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Filter results by git branches.
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    /// Filter results by git authors.
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    /// Filter results by test execution status.
    #[serde(default)]
    pub status: Option<TestStatus>,
}

/// A test title: a single string, or an array of strings for nested
/// describe blocks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TestTitle {
    /// A flat test title.
    Single(String),
    /// Titles of nested describe blocks, outermost first.
    Path(Vec<String>),
}

/// Parameters for `currents-get-tests-signatures`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTestSignatureParams {
    /// The project ID to generate the test signature for.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// Full path to the spec file.
    #[serde(rename = "specFilePath")]
    pub spec_file_path: String,
    /// Test title or array of titles (for nested describe blocks).
    #[serde(rename = "testTitle")]
    pub test_title: TestTitle,
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

/// Events that can trigger a webhook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookEvent {
    /// Run completed.
    RunFinish,
    /// Run started.
    RunStart,
    /// Run timed out.
    RunTimeout,
    /// Run was cancelled.
    RunCanceled,
}

/// Parameters for `currents-list-webhooks`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListWebhooksParams {
    /// The project ID to fetch webhooks from.
    #[serde(rename = "projectId")]
    pub project_id: String,
}

/// Parameters for `currents-get-webhook` and `currents-delete-webhook`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebhookIdParams {
    /// The webhook ID (UUID).
    #[serde(rename = "hookId")]
    pub hook_id: String,
}

/// Parameters for `currents-create-webhook`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWebhookParams {
    /// The project ID to create the webhook for.
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// URL to send webhook POST requests to.
    pub url: String,
    /// Custom headers as a JSON object string
    /// (e.g., `{"Authorization": "Bearer token"}`).
    #[serde(default)]
    pub headers: Option<String>,
    /// Events that trigger this webhook.
    #[serde(default, rename = "hookEvents")]
    pub hook_events: Option<Vec<HookEvent>>,
    /// Human-readable label for the webhook.
    #[serde(default)]
    pub label: Option<String>,
}

/// Parameters for `currents-update-webhook`. All fields but the ID are
/// optional; only provided fields are updated.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateWebhookParams {
    /// The webhook ID (UUID).
    #[serde(rename = "hookId")]
    pub hook_id: String,
    /// URL to send webhook POST requests to.
    #[serde(default)]
    pub url: Option<String>,
    /// Custom headers as a JSON object string.
    #[serde(default)]
    pub headers: Option<String>,
    /// Events that trigger this webhook.
    #[serde(default, rename = "hookEvents")]
    pub hook_events: Option<Vec<HookEvent>>,
    /// Human-readable label for the webhook.
    #[serde(default)]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_runs_params_deserialize_with_defaults() {
        let json = r#"{"projectId": "p1"}"#;
        let params: GetRunsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.project_id, "p1");
        assert!(params.limit.is_none());
        assert!(params.tag.is_none());
    }

    #[test]
    fn get_runs_params_deserialize_with_filters() {
        let json = r#"{
            "projectId": "p1",
            "limit": 25,
            "tag": ["smoke", "nightly"],
            "tag_operator": "OR",
            "status": ["PASSED", "FAILING"],
            "completion_state": ["IN_PROGRESS"]
        }"#;
        let params: GetRunsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit, Some(25));
        assert!(matches!(params.tag_operator, Some(TagOperator::Or)));
        assert_eq!(params.status.as_ref().unwrap().len(), 2);
        assert!(matches!(
            params.completion_state.as_deref(),
            Some([CompletionState::InProgress])
        ));
    }

    #[test]
    fn test_title_accepts_string_or_array() {
        let single: TestTitle = serde_json::from_str(r#""adds numbers""#).unwrap();
        assert!(matches!(single, TestTitle::Single(_)));

        let path: TestTitle = serde_json::from_str(r#"["math", "adds numbers"]"#).unwrap();
        assert!(matches!(path, TestTitle::Path(ref p) if p.len() == 2));
    }

    #[test]
    fn create_action_params_deserialize() {
        let json = r#"{
            "projectId": "p1",
            "name": "quarantine flaky",
            "action": [{"op": "quarantine"}],
            "matcher": {"op": "AND", "cond": [{"type": "title", "op": "inc", "value": "login"}]}
        }"#;
        let params: CreateActionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.action[0].op, "quarantine");
        assert_eq!(params.matcher.cond[0].condition_type, "title");
        assert!(params.expires_after.is_none());
    }

    #[test]
    fn hook_event_uses_screaming_snake_case() {
        let event: HookEvent = serde_json::from_str(r#""RUN_FINISH""#).unwrap();
        assert!(matches!(event, HookEvent::RunFinish));
        assert_eq!(serde_json::to_string(&event).unwrap(), r#""RUN_FINISH""#);
    }

    #[test]
    fn schemas_generate_for_all_params() {
        // A schema that fails to generate would panic here.
        let _ = schemars::schema_for!(ListActionsParams);
        let _ = schemars::schema_for!(CreateActionParams);
        let _ = schemars::schema_for!(GetProjectsParams);
        let _ = schemars::schema_for!(GetProjectInsightsParams);
        let _ = schemars::schema_for!(GetRunsParams);
        let _ = schemars::schema_for!(FindRunParams);
        let _ = schemars::schema_for!(CancelRunGithubCiParams);
        let _ = schemars::schema_for!(GetSpecFilesPerformanceParams);
        let _ = schemars::schema_for!(GetTestsPerformanceParams);
        let _ = schemars::schema_for!(GetTestResultsParams);
        let _ = schemars::schema_for!(GetTestSignatureParams);
        let _ = schemars::schema_for!(CreateWebhookParams);
        let _ = schemars::schema_for!(UpdateWebhookParams);
    }
}
