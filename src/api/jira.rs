//! Jira integration handlers.
//!
//! Credentials travel in the request body; each handler validates them,
//! builds a request-scoped [`JiraClient`], and maps failures per the error
//! taxonomy: 400 for validation, 401 for rejected credentials, 500 for
//! upstream failures. Sprint fetch alone degrades to an empty list.

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{
    ConnectionTestResponse, JiraConnectionRequest, ProjectsResponse, SprintsRequest,
    SprintsResponse, StoriesRequest, StoriesResponse,
};
use crate::services::JiraClient;

/// Test Jira connection credentials.
#[utoipa::path(
    post,
    path = "/api/jira/test-connection",
    tag = "Jira",
    request_body = JiraConnectionRequest,
    responses(
        (status = 200, description = "Connection test outcome", body = ConnectionTestResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse)
    )
)]
#[post("/jira/test-connection")]
pub async fn test_connection(body: web::Json<JiraConnectionRequest>) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let client = JiraClient::new(&request);
    let connected = client.test_connection().await;

    let message = if connected {
        "Connected to Jira successfully"
    } else {
        "Failed to connect to Jira"
    };

    Ok(HttpResponse::Ok().json(ConnectionTestResponse {
        success: connected,
        message: message.to_string(),
    }))
}

/// Fetch user stories, optionally scoped by project and sprint.
#[utoipa::path(
    post,
    path = "/api/jira/stories",
    tag = "Jira",
    request_body = StoriesRequest,
    responses(
        (status = 200, description = "Fetched stories", body = StoriesResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication failed", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorResponse)
    )
)]
#[post("/jira/stories")]
pub async fn stories(body: web::Json<StoriesRequest>) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let client = JiraClient::new(&request.connection);
    if !client.test_connection().await {
        return Err(AppError::Unauthorized(
            "Failed to authenticate with Jira. Please verify your credentials.".to_string(),
        ));
    }

    let stories = client
        .get_user_stories(request.project_key.as_deref(), request.sprint_id)
        .await?;

    info!("Returning {} Jira stories", stories.len());
    Ok(HttpResponse::Ok().json(StoriesResponse {
        success: true,
        count: stories.len(),
        stories,
    }))
}

/// Fetch projects visible to the credentials.
#[utoipa::path(
    post,
    path = "/api/jira/projects",
    tag = "Jira",
    request_body = JiraConnectionRequest,
    responses(
        (status = 200, description = "Fetched projects", body = ProjectsResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorResponse)
    )
)]
#[post("/jira/projects")]
pub async fn projects(body: web::Json<JiraConnectionRequest>) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let client = JiraClient::new(&request);
    let projects = client.get_projects().await?;

    Ok(HttpResponse::Ok().json(ProjectsResponse {
        success: true,
        count: projects.len(),
        projects,
    }))
}

/// Fetch open sprints for a project.
///
/// Auth failure is a 401; a sprint fetch failing *after* auth succeeded is
/// a 200 with an empty list, because sprints are an optional enrichment.
#[utoipa::path(
    post,
    path = "/api/jira/sprints",
    tag = "Jira",
    request_body = SprintsRequest,
    responses(
        (status = 200, description = "Fetched open sprints", body = SprintsResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/jira/sprints")]
pub async fn sprints(body: web::Json<SprintsRequest>) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let client = JiraClient::new(&request.connection);
    if !client.test_connection().await {
        return Err(AppError::Unauthorized(
            "Failed to authenticate with Jira. Please verify your credentials.".to_string(),
        ));
    }

    let sprints = client.get_sprints(&request.project_key).await;

    info!(
        "Returning {} open sprints for project {}",
        sprints.len(),
        request.project_key
    );
    Ok(HttpResponse::Ok().json(SprintsResponse {
        success: true,
        count: sprints.len(),
        sprints,
    }))
}

/// Configure Jira routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(test_connection)
        .service(stories)
        .service(projects)
        .service(sprints);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_invalid_base_url_yields_400_citing_field() {
        let app = test::init_service(App::new().service(stories)).await;

        let req = test::TestRequest::post()
            .uri("/jira/stories")
            .set_json(serde_json::json!({
                "baseUrl": "not a url",
                "email": "qa@acme.com",
                "apiKey": "token"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);

        let body = test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("baseUrl"));
    }

    #[actix_web::test]
    async fn test_unreachable_jira_yields_401_not_empty_list() {
        // Auth failure must be distinguishable from a post-auth sprint
        // fetch failure (which would be a 200 with an empty list).
        let app = test::init_service(App::new().service(sprints)).await;

        let req = test::TestRequest::post()
            .uri("/jira/sprints")
            .set_json(serde_json::json!({
                "baseUrl": "http://127.0.0.1:9",
                "email": "qa@acme.com",
                "apiKey": "token",
                "projectKey": "PROJ"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_connection_endpoint_reports_failure_without_erroring() {
        let app = test::init_service(App::new().service(test_connection)).await;

        let req = test::TestRequest::post()
            .uri("/jira/test-connection")
            .set_json(serde_json::json!({
                "baseUrl": "http://127.0.0.1:9",
                "email": "qa@acme.com",
                "apiKey": "token"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
    }
}
