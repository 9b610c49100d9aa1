use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`;
/// tool-facing messages carry the `[Error]` prefix in the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume version not found: {0}")]
    DocumentNotFound(String),

    #[error("{0}")]
    SectionNotFound(String),

    #[error("{0}")]
    MalformedDocument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Header content must contain at least one 'key: value' pair.")]
    EmptyMetadataUpdate,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::DocumentNotFound(_) => (StatusCode::NOT_FOUND, "DOCUMENT_NOT_FOUND"),
            AppError::SectionNotFound(_) => (StatusCode::NOT_FOUND, "SECTION_NOT_FOUND"),
            AppError::MalformedDocument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_DOCUMENT")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::EmptyMetadataUpdate => (StatusCode::BAD_REQUEST, "EMPTY_METADATA_UPDATE"),
            AppError::Yaml(e) => {
                tracing::error!("YAML error: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, "YAML_ERROR")
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR")
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": format!("[Error] {self}")
            }
        }));

        (status, body).into_response()
    }
}
