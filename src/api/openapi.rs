//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StoryGen Server",
        version = "0.3.0",
        description = "API server that turns user stories (typed in or pulled from Jira) into structured test cases via an LLM"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        // Generation endpoints
        api::generate::generate_tests,
        api::generate::generate_multi_tests,
        // Jira endpoints
        api::jira::test_connection,
        api::jira::stories,
        api::jira::projects,
        api::jira::sprints,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            // Generation
            models::GenerateRequest,
            models::GenerateMultiRequest,
            models::GenerateResponse,
            models::UserStory,
            models::TestCase,
            // Jira
            models::JiraConnectionRequest,
            models::StoriesRequest,
            models::SprintsRequest,
            models::ConnectionTestResponse,
            models::StoriesResponse,
            models::ProjectsResponse,
            models::SprintsResponse,
            models::JiraProject,
            models::Sprint,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Generation", description = "Story-to-test-case generation"),
        (name = "Jira", description = "Issue tracker integration")
    )
)]
pub struct ApiDoc;
