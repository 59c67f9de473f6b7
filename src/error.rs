//! Domain error types for the story-to-test-case server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request failed field-level validation; every violated rule is listed
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Upstream tracker rejected the supplied credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Network failure or non-2xx from the tracker or generation provider
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Generation provider returned text that fails schema validation
    #[error("Invalid model reply: {0}")]
    InvalidReply(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = match self {
            AppError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) | AppError::InvalidReply(_) => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Error response body. The presentation layer shows this message verbatim.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidReply(format!("JSON parsing error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = AppError::Validation(vec![
            "storyTitle is required".to_string(),
            "acceptanceCriteria is required".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("storyTitle"));
        assert!(msg.contains("acceptanceCriteria"));
    }

    #[test]
    fn test_status_codes() {
        use actix_web::http::StatusCode;

        let cases = [
            (
                AppError::Validation(vec!["x".into()]),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("bad creds".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Upstream("502 from tracker".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::InvalidReply("missing cases".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }
}
