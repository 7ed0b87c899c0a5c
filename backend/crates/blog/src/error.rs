//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Failures raised by the auth crate
//! (user lookups) pass through unchanged.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Malformed or missing request field
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// No live post with this id
    #[error("Post not found")]
    PostNotFound,

    /// Requester is not the post's author
    #[error("Post owner mismatch")]
    PostOwnerMismatch,

    /// Commenting user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Error from the auth crate
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            BlogError::PostNotFound | BlogError::UserNotFound => StatusCode::NOT_FOUND,
            BlogError::PostOwnerMismatch => StatusCode::FORBIDDEN,
            BlogError::Auth(e) => e.status_code(),
            BlogError::Database(_) | BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::InvalidParam(_) => ErrorKind::BadRequest,
            BlogError::PostNotFound | BlogError::UserNotFound => ErrorKind::NotFound,
            BlogError::PostOwnerMismatch => ErrorKind::Forbidden,
            BlogError::Auth(e) => e.kind(),
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Auth(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::PostOwnerMismatch => {
                tracing::warn!("Post mutation by non-owner rejected");
            }
            BlogError::Auth(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }

    /// Map an insert failure; a foreign key violation means the parent row
    /// vanished between the existence check and the insert.
    pub(crate) fn from_insert(err: sqlx::Error, missing_parent: BlogError) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => missing_parent,
            _ => BlogError::Database(err),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        BlogError::Internal(err.to_string())
    }
}
