use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Template registration error: {0}")]
    TemplateRegistration(#[from] handlebars::TemplateError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid vote: {0}")]
    InvalidVote(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, error_code) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string(), "DATABASE_ERROR")
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string(), "MIGRATION_ERROR")
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error".to_string(), "TEMPLATE_ERROR")
            }
            AppError::TemplateRegistration(e) => {
                tracing::error!("Template registration error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error".to_string(), "TEMPLATE_ERROR")
            }
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, msg.clone(), "AUTHENTICATION_ERROR")
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, msg.clone(), "NOT_FOUND")
            }
            AppError::InvalidVote(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), "INVALID_VOTE")
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), "VALIDATION_ERROR")
            }
            AppError::ValidatorError(e) => {
                let validation_errors = e
                    .field_errors()
                    .iter()
                    .map(|(field, errors)| {
                        (
                            field.to_string(),
                            errors
                                .iter()
                                .map(|e| {
                                    e.message
                                        .as_ref()
                                        .map(|m| m.to_string())
                                        .unwrap_or_else(|| e.code.to_string())
                                })
                                .collect::<Vec<_>>(),
                        )
                    })
                    .collect::<std::collections::HashMap<String, Vec<String>>>();

                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": {
                            "code": "VALIDATION_ERROR",
                            "message": "Validation failed",
                            "details": validation_errors
                        }
                    })),
                )
                    .into_response();
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), "BAD_REQUEST")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}

// 便利函数，用于创建常见错误
impl AppError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{} not found", resource))
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::Authentication(msg.to_string())
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn invalid_vote(msg: &str) -> Self {
        Self::InvalidVote(msg.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
