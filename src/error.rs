use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::entities::movie;

/// A field or request value that a movie write or listing refuses to accept.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Name must be between 2 and 100 characters")]
    NameLength,

    #[error("Invalid duration format. Use Xh or Xm.")]
    InvalidDuration,

    #[error("Rating cannot be less than 0 or greater than 10")]
    RatingOutOfRange,

    #[error("Invalid value {value:?} for query parameter {param}")]
    InvalidQuery { param: &'static str, value: String },

    #[error("{0}")]
    MalformedRequest(String),

    /// Raised by the entity's save hook.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Movie not found.")]
    NotFound,

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match movie::rejection(&err) {
            Some(msg) => Self::Validation(ValidationError::Rejected(msg.to_string())),
            None => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::MalformedRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::MalformedRequest(rejection.body_text()))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body shared by every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(err) => tracing::warn!(error = %err, "rejected request"),
            AppError::NotFound => tracing::debug!("movie not found"),
            AppError::Database(err) => tracing::error!(error = %err, "database error"),
        }

        let body = ErrorBody { success: false, error: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
