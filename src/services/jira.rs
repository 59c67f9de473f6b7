//! Jira REST client: connection test, story/project/sprint fetching.
//!
//! One client is built per request from the credentials in the request
//! body; nothing is cached across requests. No client-side timeouts are
//! set — a failed upstream call surfaces immediately and is never retried.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{JiraConnectionRequest, JiraProject, Sprint, UserStory};
use crate::services::adf::extract_description;

/// Maximum issues fetched per story search.
const MAX_STORY_RESULTS: u32 = 50;

/// Maximum projects fetched per project search.
const MAX_PROJECT_RESULTS: u32 = 100;

/// A Jira Cloud REST client scoped to one set of credentials.
pub struct JiraClient {
    base_url: String,
    email: String,
    api_key: SecretString,
    http_client: reqwest::Client,
}

/// Issue search response from `/rest/api/3/search/jql`.
#[derive(Debug, Deserialize)]
struct JqlSearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

/// A Jira issue, reduced to the fields the story mapping needs.
#[derive(Debug, Deserialize)]
struct JiraIssue {
    id: String,
    key: String,
    fields: JiraIssueFields,
}

#[derive(Debug, Deserialize)]
struct JiraIssueFields {
    summary: String,
    /// Plain string or an ADF document, depending on site configuration
    #[serde(default)]
    description: serde_json::Value,
}

/// Project search response from `/rest/api/3/project/search`.
#[derive(Debug, Deserialize)]
struct ProjectSearchResponse {
    #[serde(default)]
    values: Vec<JiraProject>,
}

/// Board list response from the agile API.
#[derive(Debug, Deserialize)]
struct BoardsResponse {
    #[serde(default)]
    values: Vec<Board>,
}

#[derive(Debug, Deserialize)]
struct Board {
    id: i64,
}

/// Sprint list response from the agile API.
#[derive(Debug, Deserialize)]
struct SprintPageResponse {
    #[serde(default)]
    values: Vec<JiraSprint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraSprint {
    id: i64,
    name: String,
    state: String,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl JiraClient {
    /// Create a client from the credentials in a connection request.
    pub fn new(connection: &JiraConnectionRequest) -> Self {
        let base_url = connection.base_url.trim_end_matches('/').to_string();
        let key_prefix: String = connection
            .api_key
            .expose_secret()
            .chars()
            .take(8)
            .collect();

        debug!(
            "Jira client initialized (base_url={}, email={}, api_key={}...)",
            base_url, connection.email, key_prefix
        );

        Self {
            base_url,
            email: connection.email.clone(),
            api_key: connection.api_key.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Basic auth header value from email and API token.
    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.api_key.expose_secret());
        format!("Basic {}", BASE64.encode(credentials))
    }

    /// Verify the credentials against `/rest/api/3/myself`.
    ///
    /// Any failure (network or non-2xx) yields `false`; callers translate
    /// that into a 401 where authentication is a precondition.
    pub async fn test_connection(&self) -> bool {
        let url = format!("{}/rest/api/3/myself", self.base_url);
        let response = match self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Content-Type", "application/json")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Jira connection test error: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            warn!("Jira connection test failed: {}", response.status());
            return false;
        }

        info!("Jira connection verified for {}", self.email);
        true
    }

    /// Fetch user stories (issue types Story and Task), newest first,
    /// optionally scoped to a project and a sprint.
    pub async fn get_user_stories(
        &self,
        project_key: Option<&str>,
        sprint_id: Option<i64>,
    ) -> AppResult<Vec<UserStory>> {
        let jql = build_story_jql(project_key, sprint_id);
        debug!("Jira JQL query: {}", jql);

        let url = format!("{}/rest/api/3/search/jql", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({
                "jql": jql,
                "maxResults": MAX_STORY_RESULTS,
                "fields": ["summary", "description"],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Jira API error: {} - {}",
                status, body
            )));
        }

        let search: JqlSearchResponse = response.json().await?;
        let stories = search
            .issues
            .into_iter()
            .map(|issue| {
                let extracted = extract_description(&issue.fields.description);
                // Empty tracker descriptions fall back to the summary so
                // the prompt never renders an empty block.
                let description = if extracted.is_empty() {
                    issue.fields.summary.clone()
                } else {
                    extracted
                };
                UserStory {
                    id: issue.id,
                    key: issue.key,
                    title: issue.fields.summary,
                    description,
                }
            })
            .collect::<Vec<_>>();

        info!("Fetched {} user stories from Jira", stories.len());
        Ok(stories)
    }

    /// Fetch up to 100 projects visible to the credentials.
    pub async fn get_projects(&self) -> AppResult<Vec<JiraProject>> {
        let url = format!(
            "{}/rest/api/3/project/search?maxResults={}",
            self.base_url, MAX_PROJECT_RESULTS
        );
        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Failed to fetch projects: {} - {}",
                status, body
            )));
        }

        let search: ProjectSearchResponse = response.json().await?;
        info!("Fetched {} Jira projects", search.values.len());
        Ok(search.values)
    }

    /// Fetch open (active or future) sprints for a project's first board.
    ///
    /// Sprints are an optional enrichment: any failure here degrades to an
    /// empty list instead of propagating, so a project without a scrum
    /// board still works.
    pub async fn get_sprints(&self, project_key: &str) -> Vec<Sprint> {
        match self.fetch_sprints(project_key).await {
            Ok(sprints) => sprints,
            Err(e) => {
                warn!(
                    "Sprint fetch for project {} failed, returning empty list: {}",
                    project_key, e
                );
                Vec::new()
            }
        }
    }

    async fn fetch_sprints(&self, project_key: &str) -> AppResult<Vec<Sprint>> {
        let board_url = format!(
            "{}/rest/agile/1.0/board?projectKeyOrId={}",
            self.base_url, project_key
        );
        let response = self
            .http_client
            .get(&board_url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Failed to fetch boards: {}",
                response.status()
            )));
        }

        let boards: BoardsResponse = response.json().await?;
        let Some(board) = boards.values.first() else {
            debug!("Project {} has no agile board", project_key);
            return Ok(Vec::new());
        };

        let sprint_url = format!("{}/rest/agile/1.0/board/{}/sprint", self.base_url, board.id);
        let response = self
            .http_client
            .get(&sprint_url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Failed to fetch sprints: {}",
                response.status()
            )));
        }

        let page: SprintPageResponse = response.json().await?;
        let sprints = page
            .values
            .into_iter()
            .map(|s| Sprint {
                id: s.id,
                name: s.name,
                state: s.state.to_lowercase(),
                start_date: s.start_date,
                end_date: s.end_date,
            })
            .collect();

        Ok(filter_open_sprints(sprints))
    }
}

/// Build the JQL story query, scoped by project and sprint when given.
fn build_story_jql(project_key: Option<&str>, sprint_id: Option<i64>) -> String {
    let mut clauses = Vec::new();
    if let Some(key) = project_key {
        clauses.push(format!("project = {}", key));
    }
    if let Some(id) = sprint_id {
        clauses.push(format!("sprint = {}", id));
    }
    clauses.push("type in (Story, Task)".to_string());
    format!("{} ORDER BY created DESC", clauses.join(" AND "))
}

/// Keep only sprints in state "active" or "future", preserving order.
pub fn filter_open_sprints(sprints: Vec<Sprint>) -> Vec<Sprint> {
    sprints
        .into_iter()
        .filter(|s| s.state == "active" || s.state == "future")
        .collect()
}
