use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::constants::API_NAME;
use crate::repository::RepositoryError;
use crate::service::PatchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid patch: {0}")]
    InvalidPatch(#[from] PatchError),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(msg) => {
                tracing::warn!("{} Invalid input: {}", API_NAME, msg);
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::Validation(e) => {
                tracing::warn!("{} Validation error: {}", API_NAME, e);
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::InvalidPatch(e) => {
                tracing::warn!("{} Invalid patch: {}", API_NAME, e);
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::NotFound(msg) => {
                tracing::warn!("{} Not found: {}", API_NAME, msg);
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Unauthorized(msg) => {
                tracing::warn!("{} Unauthorized: {}", API_NAME, msg);
                (StatusCode::UNAUTHORIZED, [(header::WWW_AUTHENTICATE, "Bearer")]).into_response()
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("{} Forbidden: {}", API_NAME, msg);
                StatusCode::FORBIDDEN.into_response()
            }
            AppError::Store(e) => {
                tracing::error!("{} Store error: {}", API_NAME, e);
                server_error(format!("Store error: {}", e))
            }
            AppError::Internal(e) => {
                tracing::error!("{} Internal error: {}", API_NAME, e);
                server_error(format!("Internal server error: {}", e))
            }
        }
    }
}

fn server_error(message: String) -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = Json(json!({
        "error": message,
        "status": status.as_u16()
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_have_empty_bodies() {
        let response = AppError::NotFound("car 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(header::CONTENT_TYPE), None);

        let response = AppError::InvalidInput("missing body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let response = AppError::Unauthorized("no token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn store_failures_map_to_server_error() {
        let response = AppError::Store(RepositoryError::MissingRow(3)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
