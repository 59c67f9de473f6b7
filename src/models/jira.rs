//! Jira request and response models.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::UserStory;

/// Jira connection credentials supplied with every tracker request.
///
/// The API token is deserialized straight into a [`SecretString`] so it
/// never shows up in debug output or logs.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JiraConnectionRequest {
    /// Jira site base URL (e.g. "https://acme.atlassian.net")
    pub base_url: String,
    /// Account email for Basic auth
    pub email: String,
    /// Jira API token
    #[schema(value_type = String)]
    pub api_key: SecretString,
}

impl JiraConnectionRequest {
    /// Validate field-level rules, collecting every violation.
    pub fn validate(&self) -> AppResult<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }

    /// Collect violations without wrapping, for use by extended shapes.
    fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if reqwest::Url::parse(&self.base_url).is_err() {
            violations.push("baseUrl: Invalid Jira base URL".to_string());
        }
        if self.email.is_empty() || !self.email.contains('@') {
            violations.push("email: Invalid email".to_string());
        }
        if self.api_key.expose_secret().is_empty() {
            violations.push("apiKey: API key is required".to_string());
        }

        violations
    }
}

/// Request for fetching user stories, optionally scoped by project and sprint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoriesRequest {
    #[serde(flatten)]
    pub connection: JiraConnectionRequest,
    /// Optional project key filter
    pub project_key: Option<String>,
    /// Optional sprint ID filter
    pub sprint_id: Option<i64>,
}

impl StoriesRequest {
    /// Validate field-level rules, collecting every violation.
    pub fn validate(&self) -> AppResult<()> {
        self.connection.validate()
    }
}

/// Request for fetching sprints; the project key is mandatory here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintsRequest {
    #[serde(flatten)]
    pub connection: JiraConnectionRequest,
    /// Project key whose board's sprints are listed
    pub project_key: String,
}

impl SprintsRequest {
    /// Validate field-level rules, collecting every violation.
    pub fn validate(&self) -> AppResult<()> {
        let mut violations = self.connection.violations();
        if self.project_key.is_empty() {
            violations.push("projectKey: Project key is required".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// A time-boxed iteration container in Jira's agile model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    /// Lowercased sprint state ("active", "future", "closed")
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// A Jira project, reduced to the fields the UI needs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JiraProject {
    pub key: String,
    pub name: String,
}

/// Response for the connection test endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: String,
}

/// Response for the stories endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoriesResponse {
    pub success: bool,
    pub stories: Vec<UserStory>,
    pub count: usize,
}

/// Response for the projects endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub success: bool,
    pub projects: Vec<JiraProject>,
    pub count: usize,
}

/// Response for the sprints endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct SprintsResponse {
    pub success: bool,
    pub sprints: Vec<Sprint>,
    pub count: usize,
}
