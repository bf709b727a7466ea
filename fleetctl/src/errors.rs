//! Service error taxonomy and its mapping onto HTTP responses.
//!
//! Handlers and repositories raise [`Error`] (directly or via
//! [`DbError`]); the `IntoResponse` implementation at the bottom is the
//! single place status codes and `{"detail": ...}` bodies are written.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::db::errors::DbError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested object or route not found
    #[error("{message}")]
    NotFound { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                // Uniqueness conflicts are reported as 400, not 409,
                // matching the service's long-observed behavior.
                DbError::UniqueViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { message } => message.clone(),
            Error::Internal { .. } => "internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "object not found".to_string(),
                DbError::UniqueViolation { .. } => "object already exists".to_string(),
                DbError::ForeignKeyViolation { .. } => "can't find referenced object".to_string(),
                DbError::CheckViolation { .. } => "invalid data provided".to_string(),
                DbError::Other(_) => "internal server error".to_string(),
            },
            Error::Other(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details here; the response body only carries
        // the user-safe message.
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "detail": self.user_message() });
        (status, Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_violation() -> DbError {
        DbError::UniqueViolation {
            constraint: Some("resource_type_name_key".to_string()),
            table: Some("resource_type".to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        }
    }

    #[test]
    fn validation_errors_map_to_400() {
        let err = Error::BadRequest {
            message: "you have to specify name".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "you have to specify name");
    }

    #[test]
    fn unique_violations_map_to_400_not_409() {
        let err = Error::Database(unique_violation());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "object already exists");
    }

    #[test]
    fn foreign_key_violations_map_to_400() {
        let err = Error::Database(DbError::ForeignKeyViolation {
            constraint: Some("resource_resource_type_id_fkey".to_string()),
            table: Some("resource".to_string()),
            message: "insert or update violates foreign key constraint".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "can't find referenced object");
    }

    #[test]
    fn unclassified_errors_map_to_500_without_detail_leak() {
        let err = Error::Other(anyhow::anyhow!("connection refused (os error 111)"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "internal server error");
    }

    #[tokio::test]
    async fn response_body_carries_detail() {
        let err = Error::NotFound {
            message: "object with id = 42 not found".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "object with id = 42 not found");
    }
}
