use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use thiserror::Error;

use crate::{
    config::ConfigError, loggers::file_logger::LoggerError, models::communication::ErrorDetail,
    quiz::QuizError, store::StoreError,
};

/// Request-level failures. Each maps onto one HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // Server-side failures are logged in full and answered generically.
    fn detail(&self) -> String {
        match self {
            AppError::Storage(_) => "Database error".to_string(),
            AppError::Configuration(_) => "Database configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::MissingCollection(name) => {
                AppError::Configuration(format!("{} not found", name))
            }
            StoreError::InvalidId(raw) => AppError::InvalidId(format!(
                "Invalid ID format {:?}. Must be a UUID string.",
                raw
            )),
            StoreError::Duplicate(collection) => {
                AppError::Conflict(format!("record already exists in {}", collection))
            }
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }

        (status, Json(ErrorDetail { detail: self.detail() })).into_response()
    }
}

/// Anything that stops the server from coming up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logger(#[from] LoggerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            AppError::Validation("name".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("gone".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidId("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("dup".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Configuration("missing".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_map_onto_the_taxonomy() {
        assert!(matches!(
            AppError::from(StoreError::InvalidId("zzz".to_string())),
            AppError::InvalidId(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Duplicate("users_collection")),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::MissingCollection("items_collection".to_string())),
            AppError::Configuration(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Database(rusqlite::Error::InvalidQuery)),
            AppError::Storage(_)
        ));
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let error = AppError::from(StoreError::Database(rusqlite::Error::InvalidQuery));
        assert_eq!(error.detail(), "Database error");
        assert!(error.to_string().starts_with("storage failure: database error"));
    }
}
