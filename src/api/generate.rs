//! Test-case generation handlers.

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::error::AppResult;
use crate::models::{GenerateMultiRequest, GenerateRequest, GenerateResponse};
use crate::prompt::{build_multi_prompt, build_prompt};
use crate::services::GenerationClient;

/// Generate test cases from a single user story.
#[utoipa::path(
    post,
    path = "/api/generate-tests",
    tag = "Generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated test cases", body = GenerateResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream or reply-shape failure", body = crate::error::ErrorResponse)
    )
)]
#[post("/generate-tests")]
pub async fn generate_tests(
    client: web::Data<GenerationClient>,
    body: web::Json<GenerateRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    info!("Generating test cases for story '{}'", request.story_title);
    let prompt = build_prompt(&request);
    let response = client.generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Generate test cases from a batch of user stories.
#[utoipa::path(
    post,
    path = "/api/generate-multi-tests",
    tag = "Generation",
    request_body = GenerateMultiRequest,
    responses(
        (status = 200, description = "Generated test cases", body = GenerateResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream or reply-shape failure", body = crate::error::ErrorResponse)
    )
)]
#[post("/generate-multi-tests")]
pub async fn generate_multi_tests(
    client: web::Data<GenerationClient>,
    body: web::Json<GenerateMultiRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    info!(
        "Generating test cases for {} stories",
        request.stories.len()
    );
    let prompt = build_multi_prompt(&request.stories, request.additional_info.as_deref());
    let response = client.generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure generation routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_tests).service(generate_multi_tests);
}
