//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing request field
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Email is already registered
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// No live user with this email
    #[error("Email not found")]
    EmailNotFound,

    /// Password does not match the stored hash
    #[error("Invalid password")]
    InvalidPassword,

    /// No live user with this id
    #[error("User not found")]
    UserNotFound,

    /// Token is missing, malformed, badly signed or outside its time window
    #[error("Invalid token")]
    InvalidToken,

    /// Token declares an algorithm outside the RSA family
    #[error("Invalid token method")]
    InvalidTokenMethod,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidParam(_)
            | AuthError::EmailAlreadyExists
            | AuthError::InvalidPassword => StatusCode::BAD_REQUEST,
            AuthError::EmailNotFound | AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidToken | AuthError::InvalidTokenMethod => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidParam(_)
            | AuthError::EmailAlreadyExists
            | AuthError::InvalidPassword => ErrorKind::BadRequest,
            AuthError::EmailNotFound | AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidToken | AuthError::InvalidTokenMethod => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidTokenMethod => {
                tracing::warn!("Token with unexpected signing algorithm rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }

    /// A unique violation on `users.email` lost a registration race
    pub(crate) fn from_insert_user(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AuthError::EmailAlreadyExists
            }
            _ => AuthError::Database(err),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AuthError::InvalidParam("email".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::EmailAlreadyExists.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::InvalidPassword.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidTokenMethod.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            AuthError::InvalidParam("x".into()),
            AuthError::EmailAlreadyExists,
            AuthError::EmailNotFound,
            AuthError::InvalidPassword,
            AuthError::UserNotFound,
            AuthError::InvalidToken,
            AuthError::InvalidTokenMethod,
            AuthError::Internal("x".into()),
        ];
        for err in errors {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_internal_message_is_not_exposed() {
        let app_err = AuthError::Internal("key file missing".into()).to_app_error();
        assert_eq!(app_err.public_message(), "internal server error");

        let app_err = AuthError::EmailNotFound.to_app_error();
        assert_eq!(app_err.public_message(), "Email not found");
    }

    #[test]
    fn test_non_unique_insert_failure_is_database_error() {
        let err = AuthError::from_insert_user(sqlx::Error::PoolClosed);
        assert!(matches!(err, AuthError::Database(_)));
    }
}
